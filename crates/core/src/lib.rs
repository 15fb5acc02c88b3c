//! EaseMyForm Core - Shared types library.
//!
//! This crate provides the types used by the EaseMyForm site and its tests:
//! - [`types`] - Identity, phone numbers, session state, percentages, prices
//!   and the display records dashboards are assembled from
//! - [`gate`] - Guards and the gated-view state used by protected pages
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! runtime. Authorization decisions are pure functions of a session snapshot,
//! which keeps them trivially testable.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod gate;
pub mod types;

pub use gate::{DataUnavailable, Denial, GatedView, Guard, RequireAdmin, RequireUser};
pub use types::*;
