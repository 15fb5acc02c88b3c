//! Session slice extractors.
//!
//! Each page asks only for the slice of session state it needs:
//!
//! - [`CurrentUser`] - the identity, read-only
//! - [`AdminFlag`] - the admin capability, read-only
//! - [`SessionControl`] - the setters, for the login flow
//!
//! All three read the current [`SessionState`] on every request. Nothing is
//! cached between requests, so a logout takes effect on the next page load.

use axum::{extract::FromRequestParts, http::request::Parts};
use easemyform_core::{Identity, PhoneNumber, SessionState};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;

/// Session keys.
pub mod keys {
    /// Key for the visitor's [`SessionState`](easemyform_core::SessionState).
    pub const SESSION_STATE: &str = "session_state";

    /// Key for a login waiting on its one-time code.
    pub const PENDING_LOGIN: &str = "pending_login";
}

/// A login that has been issued a code but not yet verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub name: String,
    pub phone: PhoneNumber,
}

/// Read the session snapshot, treating a missing or unreadable session as
/// anonymous.
async fn read_state(parts: &Parts) -> SessionState {
    match parts.extensions.get::<Session>() {
        Some(session) => session
            .get::<SessionState>(keys::SESSION_STATE)
            .await
            .ok()
            .flatten()
            .unwrap_or_default(),
        None => SessionState::anonymous(),
    }
}

/// Extractor for the logged-in identity, if any.
///
/// Never rejects.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = read_state(parts).await;
        Ok(Self(state.user().cloned()))
    }
}

/// Extractor for the admin capability.
///
/// True only while the admin flag is set and an identity is present.
#[derive(Debug, Clone, Copy)]
pub struct AdminFlag(pub bool);

impl<S> FromRequestParts<S> for AdminFlag
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_state(parts).await.is_admin()))
    }
}

/// Extractor granting write access to session state.
///
/// Only the login routes take this. Rejects with an internal error if the
/// session layer is missing.
#[derive(Clone)]
pub struct SessionControl(Session);

impl<S> FromRequestParts<S> for SessionControl
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))
    }
}

impl SessionControl {
    /// Current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn snapshot(&self) -> Result<SessionState, AppError> {
        Ok(self
            .0
            .get::<SessionState>(keys::SESSION_STATE)
            .await?
            .unwrap_or_default())
    }

    async fn store(&self, state: &SessionState) -> Result<(), AppError> {
        self.0.insert(keys::SESSION_STATE, state).await?;
        Ok(())
    }

    /// Replace the identity, leaving the admin flag as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn set_user(&self, user: Option<Identity>) -> Result<(), AppError> {
        let mut state = self.snapshot().await?;
        state.set_user(user);
        self.store(&state).await
    }

    /// Replace the admin flag, leaving the identity as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn set_is_admin(&self, is_admin: bool) -> Result<(), AppError> {
        let mut state = self.snapshot().await?;
        state.set_is_admin(is_admin);
        self.store(&state).await
    }

    /// Remember a login awaiting its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn set_pending_login(&self, pending: &PendingLogin) -> Result<(), AppError> {
        self.0.insert(keys::PENDING_LOGIN, pending).await?;
        Ok(())
    }

    /// The login awaiting its code, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn pending_login(&self) -> Result<Option<PendingLogin>, AppError> {
        Ok(self.0.get::<PendingLogin>(keys::PENDING_LOGIN).await?)
    }

    /// Complete a login.
    ///
    /// Rotates the session id before writing the new identity and flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn login(&self, user: Identity, is_admin: bool) -> Result<(), AppError> {
        self.0.cycle_id().await?;
        self.0.remove::<PendingLogin>(keys::PENDING_LOGIN).await?;
        self.store(&SessionState::new(Some(user), is_admin)).await
    }

    /// Drop all session data and the session itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.0.flush().await?;
        Ok(())
    }
}
