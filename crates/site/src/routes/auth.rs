//! Login and logout route handlers.
//!
//! Login is by phone number and a six-digit one-time code:
//!
//! 1. `POST /login` validates the name and number, issues a code, and
//!    remembers the pending login in the session.
//! 2. `POST /login/verify` checks the code, then writes the identity and
//!    admin flag through [`SessionControl`].
//!
//! There is no SMS gateway. With `OTP_ECHO` on, the code is shown on the
//! verify page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{MethodRouter, get},
};
use easemyform_core::{Identity, PhoneNumber};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{PendingLogin, SessionControl};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Code verification form data.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyForm {
    #[serde(default)]
    pub code: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub name: String,
    pub phone: String,
    pub error: Option<String>,
}

/// Code entry page template.
#[derive(Template, WebTemplate)]
#[template(path = "login_verify.html")]
pub struct VerifyTemplate {
    pub masked_phone: String,
    pub error: Option<String>,
    /// The issued code, only in echo mode.
    pub echoed_code: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::default()
}

/// Validate the login form and issue a code.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip_all)]
pub async fn request_code(
    State(state): State<AppState>,
    control: SessionControl,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let name = form.name.trim().to_string();

    let phone = match (name.is_empty(), PhoneNumber::parse(&form.phone)) {
        (true, _) => Err("Please enter your name."),
        (false, Err(_)) => Err("Please enter a valid phone number."),
        (false, Ok(phone)) => Ok(phone),
    };
    let phone = match phone {
        Ok(phone) => phone,
        Err(error) => {
            let page = LoginTemplate {
                name,
                phone: form.phone.trim().to_string(),
                error: Some(error.to_string()),
            };
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let code = state.otp().issue(&phone).await;
    let masked_phone = phone.masked();
    control
        .set_pending_login(&PendingLogin { name, phone })
        .await?;

    Ok(VerifyTemplate {
        masked_phone,
        error: None,
        echoed_code: state
            .config()
            .otp_echo
            .then(|| code.expose_secret().to_string()),
    }
    .into_response())
}

/// Check the code and complete the login.
///
/// Admins land on `/admin`, everyone else on `/dashboard`.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip_all)]
pub async fn verify(
    State(state): State<AppState>,
    control: SessionControl,
    Form(form): Form<VerifyForm>,
) -> Result<Response, AppError> {
    let Some(pending) = control.pending_login().await? else {
        let page = LoginTemplate {
            error: Some("Your login session expired. Please request a new code.".to_string()),
            ..LoginTemplate::default()
        };
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    };

    if let Err(e) = state.otp().verify(&pending.phone, &form.code).await {
        let page = VerifyTemplate {
            masked_phone: pending.phone.masked(),
            error: Some(e.to_string()),
            echoed_code: None,
        };
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let is_admin = state.config().is_admin_phone(&pending.phone);
    let masked_phone = pending.phone.masked();
    let user = Identity::new(pending.name).with_phone(pending.phone);

    set_sentry_user(&user.name, Some(masked_phone.clone()));
    tracing::info!(phone = %masked_phone, is_admin, "User logged in");

    control.login(user, is_admin).await?;

    let target = if is_admin { "/admin" } else { "/dashboard" };
    Ok(Redirect::to(target).into_response())
}

/// Log out and return to the home page.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip_all)]
pub async fn logout(control: SessionControl) -> Result<Redirect, AppError> {
    control.logout().await?;
    clear_sentry_user();
    tracing::info!("User logged out");
    Ok(Redirect::to("/"))
}

pub fn view() -> MethodRouter<AppState> {
    get(login_page).post(request_code)
}
