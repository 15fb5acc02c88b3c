//! Per-visitor session state.
//!
//! Holds the two pieces of state every gated page depends on: who the visitor
//! is and whether they carry the admin flag.

use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// Snapshot of a visitor's session.
///
/// A fresh session is anonymous: no user and no admin flag. The setters
/// replace one field each and perform no validation; the login flow is
/// trusted to set both consistently.
///
/// The admin flag is stored independently of the user, but
/// [`SessionState::is_admin`] only reports `true` while an identity is
/// present. A flag left behind without a user grants nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    user: Option<Identity>,
    #[serde(default)]
    is_admin: bool,
}

impl SessionState {
    /// An anonymous session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            is_admin: false,
        }
    }

    /// Build a session from both fields at once.
    #[must_use]
    pub const fn new(user: Option<Identity>, is_admin: bool) -> Self {
        Self { user, is_admin }
    }

    /// The logged-in identity, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    /// The raw admin flag as stored.
    #[must_use]
    pub const fn admin_flag(&self) -> bool {
        self.is_admin
    }

    /// Whether the visitor has admin capability.
    ///
    /// Requires both the flag and an identity.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin && self.user.is_some()
    }

    /// Replace the identity.
    pub fn set_user(&mut self, user: Option<Identity>) {
        self.user = user;
    }

    /// Replace the admin flag.
    pub const fn set_is_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
    }

    /// Reset to anonymous.
    pub fn clear(&mut self) {
        *self = Self::anonymous();
    }
}
