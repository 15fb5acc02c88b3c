//! Display data for the dashboards.
//!
//! The dashboards depend on [`DashboardData`], never on a concrete source.
//! [`StaticDashboardData`] serves fixed data. [`RecordedDashboardData`] is
//! the shipped provider: it builds the user dashboard from the checks the
//! user has run and falls back to the fixed data where nothing is recorded.

use async_trait::async_trait;
use chrono::Utc;
use easemyform_core::{
    DataUnavailable, DisplayRecord, DisplayValue, Icon, Identity, Percent, Tone,
};

use super::history::{CheckKind, ScoreHistory, relative_label};

/// What the user dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDashboardData {
    /// Raw ATS score. Clamped when rendered.
    pub ats_score: i64,
    /// Raw LinkedIn score. Clamped when rendered.
    pub linkedin_score: i64,
    /// When the scores were last checked, e.g. "2 days ago".
    pub last_checked: String,
    /// Most recent first.
    pub activity: Vec<DisplayRecord>,
}

/// What the admin dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboardData {
    /// Aggregate counters.
    pub stats: Vec<DisplayRecord>,
    /// Most recent first.
    pub activity: Vec<DisplayRecord>,
    /// Footer of the job management panel.
    pub jobs_note: String,
    /// Footer of the blog management panel.
    pub blog_note: String,
}

/// Source of dashboard display data.
///
/// Only called after the dashboard's guard has passed.
#[async_trait]
pub trait DashboardData: Send + Sync {
    /// Scores and activity for one user.
    async fn user_dashboard(&self, user: &Identity) -> Result<UserDashboardData, DataUnavailable>;

    /// Site-wide counters and activity.
    async fn admin_dashboard(&self) -> Result<AdminDashboardData, DataUnavailable>;
}

/// Fixed, in-memory dashboard data.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDashboardData;

#[async_trait]
impl DashboardData for StaticDashboardData {
    async fn user_dashboard(&self, user: &Identity) -> Result<UserDashboardData, DataUnavailable> {
        tracing::debug!(user = %user.name, "serving static user dashboard data");

        let ats_score = 45;
        let linkedin_score = 52;

        Ok(UserDashboardData {
            ats_score,
            linkedin_score,
            last_checked: "2 days ago".to_string(),
            activity: vec![
                DisplayRecord::activity(
                    "ATS Score Check",
                    "2 days ago",
                    DisplayValue::Score(Percent::clamped(ats_score)),
                    Tone::Blue,
                ),
                DisplayRecord::activity(
                    "LinkedIn Review",
                    "1 week ago",
                    DisplayValue::Score(Percent::clamped(linkedin_score)),
                    Tone::Purple,
                ),
                DisplayRecord::activity(
                    "Profile Updated",
                    "2 weeks ago",
                    DisplayValue::Text("Success".to_string()),
                    Tone::Green,
                ),
            ],
        })
    }

    async fn admin_dashboard(&self) -> Result<AdminDashboardData, DataUnavailable> {
        Ok(AdminDashboardData {
            stats: vec![
                DisplayRecord::stat("Total Users", 1247, Tone::Blue, Icon::Users),
                DisplayRecord::stat("Resumes Created", 10_234, Tone::Green, Icon::Document),
                DisplayRecord::stat("Active Jobs", 156, Tone::Purple, Icon::Briefcase),
                DisplayRecord::stat("Blog Posts", 89, Tone::Orange, Icon::Article),
            ],
            activity: vec![
                DisplayRecord::activity(
                    "New user registration",
                    "5 min ago",
                    DisplayValue::Text("Registered".to_string()),
                    Tone::Blue,
                )
                .with_detail("john.doe@example.com"),
                DisplayRecord::activity(
                    "Resume order completed",
                    "15 min ago",
                    DisplayValue::Text("Completed".to_string()),
                    Tone::Green,
                )
                .with_detail("Order #12345"),
                DisplayRecord::activity(
                    "New job posted",
                    "1 hour ago",
                    DisplayValue::Text("Posted".to_string()),
                    Tone::Purple,
                )
                .with_detail("Software Engineer at TechCorp"),
            ],
            jobs_note: "Last updated: 2 hours ago".to_string(),
            blog_note: "Last post: 1 day ago".to_string(),
        })
    }
}

/// Dashboard data from the user's recorded checks.
#[derive(Debug, Clone)]
pub struct RecordedDashboardData {
    history: ScoreHistory,
}

impl RecordedDashboardData {
    #[must_use]
    pub const fn new(history: ScoreHistory) -> Self {
        Self { history }
    }
}

#[async_trait]
impl DashboardData for RecordedDashboardData {
    async fn user_dashboard(&self, user: &Identity) -> Result<UserDashboardData, DataUnavailable> {
        let fallback = StaticDashboardData.user_dashboard(user).await?;
        let checks = self.history.checks(user).await;
        let Some(latest) = checks.first() else {
            return Ok(fallback);
        };

        let now = Utc::now();
        let latest_score = |kind: CheckKind| {
            checks
                .iter()
                .find(|check| check.kind == kind)
                .map(|check| i64::from(check.score.value()))
        };

        Ok(UserDashboardData {
            ats_score: latest_score(CheckKind::Ats).unwrap_or(fallback.ats_score),
            linkedin_score: latest_score(CheckKind::Linkedin).unwrap_or(fallback.linkedin_score),
            last_checked: relative_label(latest.checked_at, now),
            activity: checks
                .iter()
                .map(|check| {
                    let tone = match check.kind {
                        CheckKind::Ats => Tone::Blue,
                        CheckKind::Linkedin => Tone::Purple,
                    };
                    DisplayRecord::activity(
                        check.kind.label(),
                        relative_label(check.checked_at, now),
                        DisplayValue::Score(check.score),
                        tone,
                    )
                    .with_detail(check.subject.clone())
                })
                .collect(),
        })
    }

    async fn admin_dashboard(&self) -> Result<AdminDashboardData, DataUnavailable> {
        StaticDashboardData.admin_dashboard().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use easemyform_core::PhoneNumber;

    use super::*;
    use crate::services::history::ScoreCheck;

    fn asha() -> Identity {
        Identity::new("Asha").with_phone(PhoneNumber::parse("+919876543210").unwrap())
    }

    #[tokio::test]
    async fn test_recorded_falls_back_to_static_data() {
        let provider = RecordedDashboardData::new(ScoreHistory::new());
        assert_eq!(
            provider.user_dashboard(&asha()).await,
            StaticDashboardData.user_dashboard(&asha()).await
        );
    }

    #[tokio::test]
    async fn test_recorded_scores_and_activity() {
        let history = ScoreHistory::new();
        let provider = RecordedDashboardData::new(history.clone());
        history
            .record(&asha(), ScoreCheck::now(CheckKind::Ats, Percent::clamped(33), "cv.pdf"))
            .await;
        history
            .record(&asha(), ScoreCheck::now(CheckKind::Ats, Percent::clamped(41), "cv2.pdf"))
            .await;

        let data = provider.user_dashboard(&asha()).await.unwrap();
        assert_eq!(data.ats_score, 41);
        assert_eq!(data.linkedin_score, 52);
        assert_eq!(data.last_checked, "just now");

        let details: Vec<_> = data
            .activity
            .iter()
            .map(|r| r.detail.as_deref().unwrap())
            .collect();
        assert_eq!(details, ["cv2.pdf", "cv.pdf"]);
        assert_eq!(data.activity[0].label, "ATS Score Check");
        assert_eq!(data.activity[0].percent(), Some(Percent::clamped(41)));
    }

    #[tokio::test]
    async fn test_static_user_data_is_most_recent_first() {
        let data = StaticDashboardData
            .user_dashboard(&Identity::new("Asha"))
            .await
            .unwrap();
        assert_eq!(data.ats_score, 45);
        assert_eq!(data.linkedin_score, 52);
        let actions: Vec<_> = data.activity.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            actions,
            ["ATS Score Check", "LinkedIn Review", "Profile Updated"]
        );
    }

    #[tokio::test]
    async fn test_static_admin_data_has_four_stats() {
        let data = StaticDashboardData.admin_dashboard().await.unwrap();
        assert_eq!(data.stats.len(), 4);
        assert_eq!(data.stats[0].value.to_string(), "1,247");
        assert_eq!(data.activity.len(), 3);
        assert_eq!(
            data.activity[1].detail.as_deref(),
            Some("Order #12345")
        );
    }

    #[tokio::test]
    async fn test_static_data_is_fresh_each_call() {
        let a = StaticDashboardData.admin_dashboard().await.unwrap();
        let b = StaticDashboardData.admin_dashboard().await.unwrap();
        assert_eq!(a, b);
    }
}
