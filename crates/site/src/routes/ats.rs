//! ATS checker route handlers.
//!
//! Accepts a résumé upload and returns the free-tier score. The file body is
//! streamed and counted against the configured size limit, then discarded.
//! Scores for logged-in users are recorded for their dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State, multipart::Field},
    http::StatusCode,
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use easemyform_core::Percent;
use tracing::instrument;

use crate::filters;
use crate::middleware::CurrentUser;
use crate::services::{CheckKind, ScoreCheck, catalog};
use crate::services::scoring::{self, ATS_PREMIUM_FEATURES};
use crate::state::AppState;

/// Name of the multipart field carrying the résumé.
const FILE_FIELD: &str = "file";

/// Outcome of a free ATS check.
#[derive(Debug, Clone)]
pub struct AtsResult {
    pub filename: String,
    pub score: Percent,
    pub message: String,
    pub premium_features: &'static [&'static str],
    pub upgrade_url: &'static str,
}

impl AtsResult {
    fn for_file(filename: String) -> Self {
        let score = scoring::ats_score(&filename);
        Self {
            message: format!(
                "Your ATS score is {}/100. Upgrade to premium for detailed analysis and higher accuracy.",
                score.value()
            ),
            filename,
            score,
            premium_features: ATS_PREMIUM_FEATURES,
            upgrade_url: catalog::ATS_PREMIUM.purchase_url,
        }
    }
}

/// ATS checker page template.
#[derive(Template, WebTemplate)]
#[template(path = "ats_checker.html")]
pub struct AtsCheckerTemplate {
    pub user_name: Option<String>,
    pub error: Option<String>,
    pub result: Option<AtsResult>,
    pub premium_price: String,
}

impl AtsCheckerTemplate {
    fn new(user_name: Option<String>) -> Self {
        Self {
            user_name,
            error: None,
            result: None,
            premium_price: catalog::ATS_PREMIUM.price().to_string(),
        }
    }
}

/// Reasons an upload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,
    #[error("No file selected")]
    NoFileSelected,
    #[error("Invalid file type. Only PDF, DOC, and DOCX files are allowed")]
    InvalidType,
    #[error("File too large. Maximum size is {max_mb} MB")]
    TooLarge { max_mb: usize },
    #[error("Could not read the upload")]
    Malformed,
}

/// Display the ATS checker.
#[instrument(skip_all)]
pub async fn ats_page(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    AtsCheckerTemplate::new(user.map(|u| u.name))
}

/// Score an uploaded résumé.
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> impl IntoResponse {
    let mut page = AtsCheckerTemplate::new(user.as_ref().map(|u| u.name.clone()));

    match receive_upload(multipart, state.config().max_file_size).await {
        Ok(filename) => {
            let result = AtsResult::for_file(filename);
            tracing::info!(
                file = %result.filename,
                score = result.score.value(),
                "ATS check scored"
            );
            if let Some(user) = &user {
                let check = ScoreCheck::now(CheckKind::Ats, result.score, &result.filename);
                state.history().record(user, check).await;
            }
            page.result = Some(result);
            (StatusCode::OK, page)
        }
        Err(e) => {
            tracing::info!(reason = %e, "ATS upload rejected");
            page.error = Some(e.to_string());
            (StatusCode::BAD_REQUEST, page)
        }
    }
}

/// Find the file field, validate it, and drain it within `max_bytes`.
///
/// Returns the sanitized filename.
async fn receive_upload(mut multipart: Multipart, max_bytes: usize) -> Result<String, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| UploadError::Malformed)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().trim().to_string();
        if filename.is_empty() {
            return Err(UploadError::NoFileSelected);
        }
        if !scoring::is_allowed_upload(&filename) {
            return Err(UploadError::InvalidType);
        }

        drain_within(field, max_bytes).await?;

        let safe = scoring::sanitize_filename(&filename);
        return if safe.is_empty() {
            Err(UploadError::InvalidType)
        } else {
            Ok(safe)
        };
    }

    Err(UploadError::NoFile)
}

async fn drain_within(mut field: Field<'_>, max_bytes: usize) -> Result<(), UploadError> {
    let mut received = 0usize;
    while let Some(chunk) = field.chunk().await.map_err(|_| UploadError::Malformed)? {
        received = received.saturating_add(chunk.len());
        if received > max_bytes {
            return Err(UploadError::TooLarge {
                max_mb: max_bytes / (1024 * 1024),
            });
        }
    }
    Ok(())
}

/// The checker enforces its own limit while streaming, so the router-wide
/// default body limit is lifted here.
pub fn view() -> MethodRouter<AppState> {
    get(ats_page)
        .post(upload)
        .layer(DefaultBodyLimit::disable())
}
