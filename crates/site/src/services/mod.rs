//! Business logic services for the site.
//!
//! # Services
//!
//! - `dashboard_data` - Display data behind the user and admin dashboards
//! - `history` - Per-user record of free checks
//! - `otp` - One-time login codes
//! - `scoring` - Free-tier ATS and LinkedIn scores
//! - `recommendations` - Score-driven dashboard cards
//! - `catalog` - Services, plans and templates

pub mod catalog;
pub mod dashboard_data;
pub mod history;
pub mod otp;
pub mod recommendations;
pub mod scoring;

pub use dashboard_data::{
    AdminDashboardData, DashboardData, RecordedDashboardData, StaticDashboardData,
    UserDashboardData,
};
pub use history::{CheckKind, ScoreCheck, ScoreHistory};
pub use otp::{OtpError, OtpStore};
