//! Authenticated visitor identity.

use serde::{Deserialize, Serialize};

use super::phone::PhoneNumber;

/// The identity of a logged-in visitor.
///
/// Minimal data kept in the session; the dashboards only need a display
/// name, the login flow additionally records the verified phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Name shown in greetings.
    pub name: String,
    /// Phone number verified by the one-time-code login.
    #[serde(default)]
    pub phone: Option<PhoneNumber>,
}

impl Identity {
    /// Create an identity with only a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
        }
    }

    /// Attach a verified phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }
}
