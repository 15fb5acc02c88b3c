//! Fallback for unknown paths.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::OriginalUri, http::StatusCode, response::IntoResponse};

use crate::filters;

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

/// Render the not found page with a 404 status.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route");
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}
