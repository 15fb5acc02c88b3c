//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore};
use crate::services::{DashboardData, OtpStore, RecordedDashboardData, ScoreHistory};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Session state lives in the session store
/// and reaches handlers through extractors; the only per-user data here is
/// the history of free checks.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    content: ContentStore,
    otp: OtpStore,
    history: ScoreHistory,
    dashboard_data: Arc<dyn DashboardData>,
}

impl AppState {
    /// Create state whose dashboards read the recorded check history.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn new(config: SiteConfig) -> Result<Self, ContentError> {
        let history = ScoreHistory::new();
        let provider = Arc::new(RecordedDashboardData::new(history.clone()));
        Self::build(config, history, provider)
    }

    /// Create state with a specific dashboard data provider.
    ///
    /// Checks are still recorded, but the dashboards only see them if the
    /// provider reads them.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn with_dashboard_data(
        config: SiteConfig,
        dashboard_data: Arc<dyn DashboardData>,
    ) -> Result<Self, ContentError> {
        Self::build(config, ScoreHistory::new(), dashboard_data)
    }

    fn build(
        config: SiteConfig,
        history: ScoreHistory,
        dashboard_data: Arc<dyn DashboardData>,
    ) -> Result<Self, ContentError> {
        let content = ContentStore::load(&config.content_dir)?;
        let otp = OtpStore::new(config.otp_expiry);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                content,
                otp,
                history,
                dashboard_data,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the loaded markdown content.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the login code store.
    #[must_use]
    pub fn otp(&self) -> &OtpStore {
        &self.inner.otp
    }

    /// Get the history of free checks.
    #[must_use]
    pub fn history(&self) -> &ScoreHistory {
        &self.inner.history
    }

    /// Get the dashboard data provider.
    #[must_use]
    pub fn dashboard_data(&self) -> &dyn DashboardData {
        self.inner.dashboard_data.as_ref()
    }
}
