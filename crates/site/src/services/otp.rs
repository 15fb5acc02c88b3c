//! One-time login codes.
//!
//! Codes are six digits, keyed by phone number and held in a `moka` cache
//! whose TTL is the code lifetime. Issuing a new code for the same number
//! replaces the previous one. A code is consumed by a successful
//! verification and burned after [`MAX_ATTEMPTS`] wrong guesses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use easemyform_core::PhoneNumber;
use moka::future::Cache;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};

/// Upper bound on outstanding codes.
const MAX_PENDING_CODES: u64 = 10_000;

/// Wrong guesses allowed before a code is invalidated.
pub const MAX_ATTEMPTS: u8 = 5;

/// Errors verifying a login code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OtpError {
    /// No code was issued for this number, or it expired.
    #[error("Code not found or expired")]
    NotFoundOrExpired,
    /// A code exists but does not match.
    #[error("Invalid code")]
    Invalid,
    /// The code was guessed wrong too often and has been invalidated.
    #[error("Too many attempts. Please request a new code.")]
    TooManyAttempts,
}

/// An issued code and the wrong guesses made against it.
struct PendingCode {
    secret: SecretString,
    attempts: AtomicU8,
}

/// Outstanding login codes.
#[derive(Clone)]
pub struct OtpStore {
    codes: Cache<PhoneNumber, Arc<PendingCode>>,
}

impl std::fmt::Debug for OtpStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpStore")
            .field("pending", &self.codes.entry_count())
            .finish()
    }
}

impl OtpStore {
    /// Create a store whose codes live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            codes: Cache::builder()
                .max_capacity(MAX_PENDING_CODES)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Issue a fresh code for `phone`, replacing any earlier one.
    pub async fn issue(&self, phone: &PhoneNumber) -> SecretString {
        let code = generate_code();
        let pending = PendingCode {
            secret: SecretString::from(code.clone()),
            attempts: AtomicU8::new(0),
        };
        self.codes.insert(phone.clone(), Arc::new(pending)).await;
        tracing::info!(phone = %phone.masked(), "login code issued");
        SecretString::from(code)
    }

    /// Check `code` against the one issued for `phone`.
    ///
    /// On success the code is removed and cannot be used again. A wrong code
    /// leaves the stored one in place until the [`MAX_ATTEMPTS`]th mismatch,
    /// which removes it.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::NotFoundOrExpired`] if nothing is outstanding for
    /// the number, [`OtpError::Invalid`] on a mismatch and
    /// [`OtpError::TooManyAttempts`] on the mismatch that burns the code.
    pub async fn verify(&self, phone: &PhoneNumber, code: &str) -> Result<(), OtpError> {
        let stored = self
            .codes
            .get(phone)
            .await
            .ok_or(OtpError::NotFoundOrExpired)?;

        if stored.secret.expose_secret() != code.trim() {
            let attempts = stored.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::warn!(phone = %phone.masked(), attempts, "login code mismatch");
            if attempts >= MAX_ATTEMPTS {
                self.codes.invalidate(phone).await;
                return Err(OtpError::TooManyAttempts);
            }
            return Err(OtpError::Invalid);
        }

        self.codes.invalidate(phone).await;
        Ok(())
    }
}

fn generate_code() -> String {
    rand::rng().random_range(100_000..=999_999_u32).to_string()
}
