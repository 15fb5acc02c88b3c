//! Admin dashboard.
//!
//! Gated on the admin flag. Site counters, the job and blog management
//! panels, and recent activity.

use std::time::Duration;

use askama::Template;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use easemyform_core::{DataUnavailable, DisplayRecord, GatedView, RequireAdmin};
use tracing::instrument;

use super::gated;
use crate::error::AppError;
use crate::filters;
use crate::middleware::AdminFlag;
use crate::services::{AdminDashboardData, DashboardData};
use crate::state::AppState;

/// A management panel with its actions.
///
/// Actions are placeholders; they render as buttons with no target.
#[derive(Debug, Clone)]
pub struct ManagementPanel {
    pub title: &'static str,
    pub actions: [&'static str; 3],
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct AdminDashboardContent {
    pub stats: Vec<DisplayRecord>,
    pub panels: Vec<ManagementPanel>,
    pub activity: Vec<DisplayRecord>,
}

impl From<AdminDashboardData> for AdminDashboardContent {
    fn from(data: AdminDashboardData) -> Self {
        Self {
            stats: data.stats,
            panels: vec![
                ManagementPanel {
                    title: "Job Management",
                    actions: ["Add New Job", "View All Jobs", "Manage Categories"],
                    note: data.jobs_note,
                },
                ManagementPanel {
                    title: "Blog Management",
                    actions: ["Create New Post", "View All Posts", "Manage Categories"],
                    note: data.blog_note,
                },
            ],
            activity: data.activity,
        }
    }
}

/// Admin dashboard page.
#[derive(Template)]
#[template(path = "dashboard/admin.html")]
pub struct AdminDashboardTemplate {
    pub content: Option<AdminDashboardContent>,
    pub notice: Option<String>,
}

impl From<Result<AdminDashboardData, DataUnavailable>> for AdminDashboardTemplate {
    fn from(data: Result<AdminDashboardData, DataUnavailable>) -> Self {
        match data {
            Ok(data) => Self {
                content: Some(data.into()),
                notice: None,
            },
            Err(_) => Self {
                content: None,
                notice: Some(
                    "Site statistics are unavailable right now. Please try again shortly."
                        .to_string(),
                ),
            },
        }
    }
}

/// Resolve the admin dashboard for a session's admin flag.
///
/// The data provider is only consulted when `is_admin` is true.
pub async fn admin_dashboard_view(
    is_admin: bool,
    data: &dyn DashboardData,
    deadline: Duration,
) -> GatedView<AdminDashboardTemplate> {
    gated::resolve(RequireAdmin(is_admin), deadline, |()| data.admin_dashboard())
        .await
        .map(|((), result)| result.into())
}

/// Display the admin dashboard.
///
/// # Errors
///
/// Returns an error if the template fails to render.
#[instrument(skip_all)]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    AdminFlag(is_admin): AdminFlag,
) -> Result<impl IntoResponse, AppError> {
    if !is_admin {
        tracing::info!("Admin dashboard denied");
    }
    let view = admin_dashboard_view(
        is_admin,
        state.dashboard_data(),
        state.config().dashboard_data_timeout,
    )
    .await;
    gated::respond(view, "/admin")
}

pub fn view() -> MethodRouter<AppState> {
    get(admin_dashboard)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use easemyform_core::{Denial, Identity};

    use super::*;
    use crate::services::{StaticDashboardData, UserDashboardData};

    const DEADLINE: Duration = Duration::from_secs(1);

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DashboardData for Counting {
        async fn user_dashboard(
            &self,
            user: &Identity,
        ) -> Result<UserDashboardData, DataUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StaticDashboardData.user_dashboard(user).await
        }

        async fn admin_dashboard(&self) -> Result<AdminDashboardData, DataUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StaticDashboardData.admin_dashboard().await
        }
    }

    /// Never answers within any reasonable deadline.
    struct Slow;

    #[async_trait]
    impl DashboardData for Slow {
        async fn user_dashboard(&self, _: &Identity) -> Result<UserDashboardData, DataUnavailable> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(DataUnavailable::new("slow"))
        }

        async fn admin_dashboard(&self) -> Result<AdminDashboardData, DataUnavailable> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StaticDashboardData.admin_dashboard().await
        }
    }

    struct Failing;

    #[async_trait]
    impl DashboardData for Failing {
        async fn user_dashboard(&self, _: &Identity) -> Result<UserDashboardData, DataUnavailable> {
            Err(DataUnavailable::new("backend down"))
        }

        async fn admin_dashboard(&self) -> Result<AdminDashboardData, DataUnavailable> {
            Err(DataUnavailable::new("backend down"))
        }
    }

    fn render(view: GatedView<AdminDashboardTemplate>) -> (StatusCode, String) {
        gated::render_view(view, "/admin").unwrap()
    }

    #[tokio::test]
    async fn test_non_admin_is_denied_without_fetching() {
        let provider = Counting::default();
        let view = admin_dashboard_view(false, &provider, DEADLINE).await;

        assert_eq!(view.denial(), Some(Denial::AccessDenied));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let (status, body) = render(view);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("Access Denied"));
        assert!(!body.contains("Login Now"));
        assert!(!body.contains("Total Users"));
        assert!(!body.contains("Job Management"));
    }

    #[tokio::test]
    async fn test_admin_sees_tiles_panels_and_activity() {
        let provider = Counting::default();
        let (status, body) = render(admin_dashboard_view(true, &provider, DEADLINE).await);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("class=\"stat-tile").count(), 4);
        for text in [
            "Total Users",
            "1,247",
            "10,234",
            "Job Management",
            "Blog Management",
            "Add New Job",
            "Create New Post",
            "Last updated: 2 hours ago",
            "Order #12345",
        ] {
            assert!(body.contains(text), "missing {text}");
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_activity_is_most_recent_first() {
        let (_, body) = render(admin_dashboard_view(true, &StaticDashboardData, DEADLINE).await);
        let first = body.find("New user registration").unwrap();
        let second = body.find("Resume order completed").unwrap();
        let third = body.find("New job posted").unwrap();
        assert!(first < second && second < third);
    }

    #[tokio::test]
    async fn test_slow_provider_shows_loading() {
        let view = admin_dashboard_view(true, &Slow, Duration::from_millis(20)).await;
        assert!(matches!(view, GatedView::Loading));

        let (status, body) = render(view);
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("url=/admin"));
        assert!(!body.contains("Total Users"));
    }

    #[tokio::test]
    async fn test_unavailable_data_renders_notice() {
        let (status, body) = render(admin_dashboard_view(true, &Failing, DEADLINE).await);
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Admin Dashboard"));
        assert!(body.contains("unavailable right now"));
        assert!(!body.contains("class=\"stat-tile"));
    }

    #[tokio::test]
    async fn test_rendering_is_idempotent() {
        let first = render(admin_dashboard_view(true, &StaticDashboardData, DEADLINE).await);
        let second = render(admin_dashboard_view(true, &StaticDashboardData, DEADLINE).await);
        assert_eq!(first, second);
    }
}
