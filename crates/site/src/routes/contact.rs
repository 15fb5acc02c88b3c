//! Contact form route handlers.
//!
//! Enquiries are validated and logged. There is no mail gateway; support
//! reads them from the log stream.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub name: String,
    pub email: String,
    pub message: String,
    pub error: Option<&'static str>,
    pub sent: bool,
}

/// Display the contact form.
#[instrument]
pub async fn contact_page() -> impl IntoResponse {
    ContactTemplate::default()
}

/// Submit the contact form.
#[instrument(skip(form), fields(email = %form.email.trim()))]
pub async fn submit(Form(form): Form<ContactForm>) -> impl IntoResponse {
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_lowercase();
    let message = form.message.trim().to_string();

    let error = if name.is_empty() || message.is_empty() {
        Some("Name and message are required.")
    } else if !is_valid_email(&email) {
        Some("Please enter a valid email address.")
    } else {
        None
    };

    if let Some(error) = error {
        return (
            StatusCode::BAD_REQUEST,
            ContactTemplate {
                name,
                email,
                message,
                error: Some(error),
                sent: false,
            },
        );
    }

    tracing::info!(
        name = %name,
        email = %email,
        message_len = message.len(),
        "Contact enquiry received"
    );

    (
        StatusCode::OK,
        ContactTemplate {
            name,
            sent: true,
            ..ContactTemplate::default()
        },
    )
}

pub fn view() -> MethodRouter<AppState> {
    get(contact_page).post(submit)
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && email.len() <= 254
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.in"));
        assert!(!is_valid_email("no-at-symbol"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("asha@"));
        assert!(!is_valid_email("asha@localhost"));
        assert!(!is_valid_email("asha@example.com."));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_fields() {
        let response = submit(Form(ContactForm {
            name: "  ".to_string(),
            email: "asha@example.com".to_string(),
            message: "Hello".to_string(),
        }))
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_of(response).await.contains("Name and message are required."));
    }

    #[tokio::test]
    async fn test_submit_keeps_input_on_bad_email() {
        let response = submit(Form(ContactForm {
            name: "Asha".to_string(),
            email: "not-an-email".to_string(),
            message: "Need a resume".to_string(),
        }))
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert!(body.contains("Please enter a valid email address."));
        assert!(body.contains("Need a resume"));
    }

    #[tokio::test]
    async fn test_submit_thanks_sender() {
        let response = submit(Form(ContactForm {
            name: "Asha".to_string(),
            email: "Asha@Example.com".to_string(),
            message: "Need a resume".to_string(),
        }))
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(response).await.contains("Thank you, Asha!"));
    }
}
