//! Gated views.
//!
//! A gated view checks a guard against the current session snapshot before
//! anything else happens. Only a passing guard lets the view fetch and render
//! its data; a failing guard yields a [`Denial`] and nothing more.

use serde::Serialize;

use crate::types::Identity;

/// Why a gated view refused to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Denial {
    /// No identity in the session.
    LoginRequired,
    /// Identity present (or not) but no admin capability.
    AccessDenied,
}

impl Denial {
    /// HTTP status code for the denial page.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::LoginRequired => 401,
            Self::AccessDenied => 403,
        }
    }

    /// Page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::LoginRequired => "Please Login",
            Self::AccessDenied => "Access Denied",
        }
    }

    /// Body text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LoginRequired => "You need to login to access your dashboard.",
            Self::AccessDenied => "You don't have permission to access this page.",
        }
    }

    /// Where the denial page may send the visitor, if anywhere.
    ///
    /// Only the login prompt offers a way forward.
    #[must_use]
    pub const fn login_link(self) -> Option<&'static str> {
        match self {
            Self::LoginRequired => Some("/login"),
            Self::AccessDenied => None,
        }
    }
}

/// A data provider could not supply display data.
///
/// Distinct from [`Denial`]: the visitor is allowed to see the page, the data
/// just is not there. Rendered as an inline notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("data unavailable: {reason}")]
pub struct DataUnavailable {
    pub reason: String,
}

impl DataUnavailable {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The three states of a gated view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatedView<T> {
    /// Guard failed. Carries no data.
    Unauthorized(Denial),
    /// Guard passed, data not yet available.
    Loading,
    /// Guard passed, data available.
    Ready(T),
}

impl<T> GatedView<T> {
    /// Transform the ready payload, leaving the other states untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GatedView<U> {
        match self {
            Self::Unauthorized(denial) => GatedView::Unauthorized(denial),
            Self::Loading => GatedView::Loading,
            Self::Ready(value) => GatedView::Ready(f(value)),
        }
    }

    /// The denial, if the guard failed.
    #[must_use]
    pub const fn denial(&self) -> Option<Denial> {
        match self {
            Self::Unauthorized(denial) => Some(*denial),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

/// A guard condition evaluated against a session slice.
///
/// `check` consumes the slice and either grants access, yielding whatever the
/// view needs from the session, or denies it.
pub trait Guard {
    /// What a passing check hands to the view.
    type Grant;

    /// Evaluate the guard.
    ///
    /// # Errors
    ///
    /// Returns the [`Denial`] to render when the guard fails.
    fn check(self) -> Result<Self::Grant, Denial>;
}

/// Guard: an identity must be present.
#[derive(Debug, Clone, Copy)]
pub struct RequireUser<'a>(pub Option<&'a Identity>);

impl<'a> Guard for RequireUser<'a> {
    type Grant = &'a Identity;

    fn check(self) -> Result<Self::Grant, Denial> {
        self.0.ok_or(Denial::LoginRequired)
    }
}

/// Guard: the admin capability must be set.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub bool);

impl Guard for RequireAdmin {
    type Grant = ();

    fn check(self) -> Result<Self::Grant, Denial> {
        if self.0 {
            Ok(())
        } else {
            Err(Denial::AccessDenied)
        }
    }
}
