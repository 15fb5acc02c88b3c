//! Core types for EaseMyForm.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod display;
pub mod identity;
pub mod percent;
pub mod phone;
pub mod price;
pub mod session;

pub use display::{DisplayRecord, DisplayValue, Icon, Tone};
pub use identity::Identity;
pub use percent::Percent;
pub use phone::{PhoneError, PhoneNumber};
pub use price::{CurrencyCode, Price};
pub use session::SessionState;
