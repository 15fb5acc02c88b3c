//! Static page route handlers.
//!
//! Pricing, the template gallery and the LinkedIn optimization pitch are
//! built from the service catalog. The privacy policy is markdown content.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use chrono::NaiveDate;
use tracing::instrument;

use crate::filters;
use crate::services::catalog::{self, Plan, ResumeTemplate};
use crate::state::AppState;

/// Pricing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub plans: Vec<Plan>,
}

/// Display the pricing page.
#[instrument]
pub async fn pricing() -> impl IntoResponse {
    PricingTemplate {
        plans: catalog::pricing_plans(),
    }
}

pub fn pricing_view() -> MethodRouter<AppState> {
    get(pricing)
}

/// Resume template gallery.
#[derive(Template, WebTemplate)]
#[template(path = "resume_templates.html")]
pub struct ResumeTemplatesTemplate {
    pub templates: &'static [ResumeTemplate],
}

/// Display the resume template gallery.
#[instrument]
pub async fn resume_templates() -> impl IntoResponse {
    ResumeTemplatesTemplate {
        templates: catalog::RESUME_TEMPLATES,
    }
}

pub fn resume_templates_view() -> MethodRouter<AppState> {
    get(resume_templates)
}

/// LinkedIn optimization service page.
#[derive(Template, WebTemplate)]
#[template(path = "linkedin_optimization.html")]
pub struct LinkedinOptimizationTemplate {
    pub price: String,
    pub purchase_url: &'static str,
    pub process: &'static [&'static str],
    pub features: &'static [&'static str],
    pub security_note: &'static str,
}

/// Display the LinkedIn optimization service page.
#[instrument]
pub async fn linkedin_optimization() -> impl IntoResponse {
    LinkedinOptimizationTemplate {
        price: catalog::LINKEDIN_OPTIMIZATION.price().to_string(),
        purchase_url: catalog::LINKEDIN_OPTIMIZATION.purchase_url,
        process: catalog::OPTIMIZATION_PROCESS,
        features: catalog::OPTIMIZATION_FEATURES,
        security_note: catalog::OPTIMIZATION_SECURITY_NOTE,
    }
}

pub fn linkedin_optimization_view() -> MethodRouter<AppState> {
    get(linkedin_optimization)
}

/// Markdown content page template.
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct ContentPageTemplate {
    pub title: String,
    pub description: String,
    pub updated_at: Option<NaiveDate>,
    pub content_html: String,
}

/// Serve a content page by slug.
fn serve_content_page(state: &AppState, slug: &str) -> Result<ContentPageTemplate, StatusCode> {
    let page = state
        .content()
        .get_page(slug)
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(ContentPageTemplate {
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        updated_at: page.meta.updated_at,
        content_html: page.content_html.clone(),
    })
}

/// Display the privacy policy.
///
/// # Errors
///
/// Returns 404 if the page isn't in the content directory.
#[instrument(skip(state))]
pub async fn privacy_policy(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    serve_content_page(&state, "privacy-policy")
}

pub fn privacy_policy_view() -> MethodRouter<AppState> {
    get(privacy_policy)
}
