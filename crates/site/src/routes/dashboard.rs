//! User dashboard.
//!
//! Gated on an identity. Shows the visitor's two scores, quick actions,
//! recent activity and score-driven recommendations.

use std::time::Duration;

use askama::Template;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use easemyform_core::{
    DataUnavailable, DisplayRecord, GatedView, Icon, Identity, Percent, RequireUser, Tone,
};
use tracing::instrument;

use super::gated;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CurrentUser;
use crate::services::recommendations::{self, Recommendation};
use crate::services::{DashboardData, UserDashboardData};
use crate::state::AppState;

/// A link in the quick actions panel.
#[derive(Debug, Clone, Copy)]
pub struct QuickAction {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: Icon,
}

/// Quick actions shown to every logged-in user.
pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Check ATS Score",
        href: "/ats-checker",
        icon: Icon::Chart,
    },
    QuickAction {
        label: "Review LinkedIn Profile",
        href: "/linkedin-review",
        icon: Icon::Linkedin,
    },
    QuickAction {
        label: "Order Resume Service",
        href: "/pricing",
        icon: Icon::Document,
    },
    QuickAction {
        label: "LinkedIn Optimization",
        href: "/linkedin-optimization",
        icon: Icon::Linkedin,
    },
];

const SCORES_UNAVAILABLE: &str = "Your scores are unavailable right now. Please try again shortly.";

/// Data-dependent sections of the dashboard.
#[derive(Debug, Clone)]
pub struct UserDashboardContent {
    pub scores: Vec<DisplayRecord>,
    pub last_checked: String,
    pub activity: Vec<DisplayRecord>,
    pub recommendations: Vec<Recommendation>,
}

impl From<UserDashboardData> for UserDashboardContent {
    fn from(data: UserDashboardData) -> Self {
        let ats = DisplayRecord::score("ATS Score", data.ats_score, Tone::Blue, Icon::Chart)
            .with_detail("Your resume ATS compatibility score");
        let linkedin = DisplayRecord::score(
            "LinkedIn Score",
            data.linkedin_score,
            Tone::Purple,
            Icon::Linkedin,
        )
        .with_detail("Your LinkedIn profile optimization score");

        let recommendations = recommendations::for_scores(
            ats.percent().unwrap_or(Percent::ZERO),
            linkedin.percent().unwrap_or(Percent::ZERO),
        );

        Self {
            scores: vec![ats, linkedin],
            last_checked: data.last_checked,
            activity: data.activity,
            recommendations,
        }
    }
}

/// User dashboard page.
#[derive(Template)]
#[template(path = "dashboard/user.html")]
pub struct UserDashboardTemplate {
    pub name: String,
    pub quick_actions: &'static [QuickAction],
    pub content: Option<UserDashboardContent>,
    pub notice: Option<String>,
}

impl UserDashboardTemplate {
    fn new(user: &Identity, data: Result<UserDashboardData, DataUnavailable>) -> Self {
        let (content, notice) = match data {
            Ok(data) => (Some(data.into()), None),
            Err(_) => (None, Some(SCORES_UNAVAILABLE.to_string())),
        };

        Self {
            name: user.name.clone(),
            quick_actions: QUICK_ACTIONS,
            content,
            notice,
        }
    }
}

/// Resolve the user dashboard for a session's user slice.
///
/// The data provider is only consulted when `user` is present.
pub async fn user_dashboard_view(
    user: Option<&Identity>,
    data: &dyn DashboardData,
    deadline: Duration,
) -> GatedView<UserDashboardTemplate> {
    gated::resolve(RequireUser(user), deadline, |user| data.user_dashboard(user))
        .await
        .map(|(user, result)| UserDashboardTemplate::new(user, result))
}

/// Display the user dashboard.
///
/// # Errors
///
/// Returns an error if the template fails to render.
#[instrument(skip_all)]
pub async fn user_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let view = user_dashboard_view(
        user.as_ref(),
        state.dashboard_data(),
        state.config().dashboard_data_timeout,
    )
    .await;
    gated::respond(view, "/dashboard")
}

pub fn view() -> MethodRouter<AppState> {
    get(user_dashboard)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use easemyform_core::{Denial, DisplayValue};

    use super::*;
    use crate::services::{AdminDashboardData, StaticDashboardData};

    const DEADLINE: Duration = Duration::from_secs(1);

    /// Wraps a provider and counts calls.
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

    /// Returns fixed scores and activity.
    struct Fixed(UserDashboardData);

    #[async_trait]
    impl DashboardData for Fixed {
        async fn user_dashboard(&self, _: &Identity) -> Result<UserDashboardData, DataUnavailable> {
            Ok(self.0.clone())
        }

        async fn admin_dashboard(&self) -> Result<AdminDashboardData, DataUnavailable> {
            Err(DataUnavailable::new("not used"))
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

    fn render(view: GatedView<UserDashboardTemplate>) -> (StatusCode, String) {
        gated::render_view(view, "/dashboard").unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_gets_login_prompt_without_fetching() {
        let provider = Counting::default();
        let view = user_dashboard_view(None, &provider, DEADLINE).await;

        assert_eq!(view.denial(), Some(Denial::LoginRequired));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let (status, body) = render(view);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Please Login"));
        assert!(!body.contains("ATS Score"));
        assert!(!body.contains("Recent Activity"));
    }

    #[tokio::test]
    async fn test_user_sees_greeting_and_two_score_cards() {
        let provider = Counting::default();
        let asha = Identity::new("Asha");
        let (status, body) = render(user_dashboard_view(Some(&asha), &provider, DEADLINE).await);

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Welcome back, Asha!"));
        assert_eq!(body.matches("class=\"score-card").count(), 2);
        assert!(body.contains("Upgrade Now - ₹99"));
        assert!(body.contains("Get Optimized - ₹1499"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_name_is_escaped() {
        let provider = StaticDashboardData;
        let user = Identity::new("<script>x</script>");
        let (_, body) = render(user_dashboard_view(Some(&user), &provider, DEADLINE).await);
        assert!(!body.contains("<script>x</script>"));
    }

    #[tokio::test]
    async fn test_scores_are_clamped() {
        let provider = Fixed(UserDashboardData {
            ats_score: 145,
            linkedin_score: -10,
            last_checked: "today".to_string(),
            activity: Vec::new(),
        });
        let asha = Identity::new("Asha");
        let GatedView::Ready(page) = user_dashboard_view(Some(&asha), &provider, DEADLINE).await
        else {
            panic!("expected ready view");
        };
        let content = page.content.as_ref().unwrap();
        assert_eq!(content.scores[0].percent(), Some(Percent::FULL));
        assert_eq!(content.scores[1].percent(), Some(Percent::ZERO));

        let body = page.render().unwrap();
        assert!(body.contains("value=\"100\""));
        assert!(body.contains("value=\"0\""));
    }

    #[tokio::test]
    async fn test_activity_order_is_preserved() {
        let activity = vec![
            DisplayRecord::activity(
                "Zeta step",
                "1 min ago",
                DisplayValue::Text("a".into()),
                Tone::Blue,
            ),
            DisplayRecord::activity(
                "Alpha step",
                "1 day ago",
                DisplayValue::Text("b".into()),
                Tone::Blue,
            ),
            DisplayRecord::activity(
                "Mid step",
                "1 year ago",
                DisplayValue::Text("c".into()),
                Tone::Blue,
            ),
        ];
        let provider = Fixed(UserDashboardData {
            ats_score: 50,
            linkedin_score: 50,
            last_checked: "today".to_string(),
            activity: activity.clone(),
        });
        let asha = Identity::new("Asha");
        let GatedView::Ready(page) = user_dashboard_view(Some(&asha), &provider, DEADLINE).await
        else {
            panic!("expected ready view");
        };
        assert_eq!(page.content.as_ref().unwrap().activity, activity);

        let body = page.render().unwrap();
        let zeta = body.find("Zeta step").unwrap();
        let alpha = body.find("Alpha step").unwrap();
        let mid = body.find("Mid step").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[tokio::test]
    async fn test_rendering_is_idempotent() {
        let provider = StaticDashboardData;
        let asha = Identity::new("Asha");
        let first = render(user_dashboard_view(Some(&asha), &provider, DEADLINE).await);
        let second = render(user_dashboard_view(Some(&asha), &provider, DEADLINE).await);
        assert_eq!(first, second);

        let first = render(user_dashboard_view(None, &provider, DEADLINE).await);
        let second = render(user_dashboard_view(None, &provider, DEADLINE).await);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unavailable_data_renders_inline_notice() {
        let asha = Identity::new("Asha");
        let (status, body) = render(user_dashboard_view(Some(&asha), &Failing, DEADLINE).await);
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Welcome back, Asha!"));
        assert!(body.contains("unavailable right now"));
        assert!(body.contains("Quick Actions"));
        assert!(!body.contains("class=\"score-card"));
    }
}
