//! LinkedIn review route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use easemyform_core::Percent;
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::middleware::CurrentUser;
use crate::services::{CheckKind, ScoreCheck, catalog};
use crate::services::scoring::{self, LINKEDIN_FREE_RECOMMENDATIONS, LinkedinScores};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub profile_url: String,
}

/// A free review, ready to render.
#[derive(Debug, Clone)]
pub struct ReviewResult {
    pub profile_url: String,
    pub overall: Percent,
    pub feedback: [(&'static str, &'static str); 3],
    pub recommendations: &'static [&'static str],
    pub upgrade_url: &'static str,
}

impl From<(String, LinkedinScores)> for ReviewResult {
    fn from((profile_url, scores): (String, LinkedinScores)) -> Self {
        Self {
            profile_url,
            overall: scores.overall,
            feedback: scores.basic_feedback(),
            recommendations: LINKEDIN_FREE_RECOMMENDATIONS,
            upgrade_url: catalog::LINKEDIN_REVIEW_UPGRADE_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("LinkedIn profile URL is required")]
    Missing,
    #[error("Invalid LinkedIn profile URL format")]
    InvalidFormat,
}

/// Validate and score a submitted profile URL.
///
/// # Errors
///
/// Returns an error if the URL is blank or not a LinkedIn profile URL.
pub fn review(profile_url: &str) -> Result<ReviewResult, ReviewError> {
    let url = profile_url.trim();
    if url.is_empty() {
        return Err(ReviewError::Missing);
    }
    if !scoring::is_linkedin_profile_url(url) {
        return Err(ReviewError::InvalidFormat);
    }
    Ok((url.to_string(), scoring::linkedin_scores(url)).into())
}

/// LinkedIn review page template.
#[derive(Template, WebTemplate)]
#[template(path = "linkedin_review.html")]
pub struct LinkedinReviewTemplate {
    pub user_name: Option<String>,
    pub profile_url: String,
    pub error: Option<String>,
    pub result: Option<ReviewResult>,
}

/// Display the review form.
#[instrument(skip_all)]
pub async fn review_page(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    LinkedinReviewTemplate {
        user_name: user.map(|u| u.name),
        profile_url: String::new(),
        error: None,
        result: None,
    }
}

/// Review a submitted profile URL.
///
/// Reviews by logged-in users are recorded for their dashboard.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ReviewForm>,
) -> impl IntoResponse {
    let user_name = user.as_ref().map(|u| u.name.clone());
    match review(&form.profile_url) {
        Ok(result) => {
            tracing::info!(overall = result.overall.value(), "LinkedIn profile reviewed");
            if let Some(user) = &user {
                let check =
                    ScoreCheck::now(CheckKind::Linkedin, result.overall, &result.profile_url);
                state.history().record(user, check).await;
            }
            (
                StatusCode::OK,
                LinkedinReviewTemplate {
                    user_name,
                    profile_url: result.profile_url.clone(),
                    error: None,
                    result: Some(result),
                },
            )
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            LinkedinReviewTemplate {
                user_name,
                profile_url: form.profile_url.trim().to_string(),
                error: Some(e.to_string()),
                result: None,
            },
        ),
    }
}

pub fn view() -> MethodRouter<AppState> {
    get(review_page).post(submit)
}
