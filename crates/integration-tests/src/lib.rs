//! Integration tests for EaseMyForm.
//!
//! Tests drive the full site router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Test Categories
//!
//! - `routing` - Every table entry, fallbacks, headers
//! - `gated_views` - Dashboards under injected session states
//! - `login_flow` - Phone login, admin login, logout
//! - `tools` - ATS upload and LinkedIn review forms

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Request, StatusCode, header},
};
use easemyform_core::SessionState;
use easemyform_site::config::{DEFAULT_MAX_FILE_SIZE, SiteConfig};
use easemyform_site::middleware::auth::keys;
use easemyform_site::middleware::session::SESSION_COOKIE_NAME;
use easemyform_site::services::DashboardData;
use easemyform_site::state::AppState;
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::{
    MemoryStore, SessionStore,
    cookie::time::{Duration as CookieDuration, OffsetDateTime},
    session::{Id, Record},
};

/// Phone number configured as the admin.
pub const ADMIN_PHONE: &str = "+917697470397";

/// Configuration for tests: rate limiting off, login codes echoed.
#[must_use]
pub fn test_config() -> SiteConfig {
    let site_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../site");
    SiteConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://localhost:5000".to_string(),
        admin_phone: Some(SecretString::from(ADMIN_PHONE.to_string())),
        otp_expiry: Duration::from_secs(300),
        otp_echo: true,
        max_file_size: DEFAULT_MAX_FILE_SIZE,
        dashboard_data_timeout: Duration::from_secs(2),
        rate_limit_enabled: false,
        trust_proxy_headers: false,
        content_dir: site_dir.join("content"),
        static_dir: site_dir.join("static"),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The site router plus the session store behind it.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    store: MemoryStore,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The session cookie set by this response, as a `name=value` pair.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .map(str::to_string)
    }

    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The login code echoed on the verify page.
    #[must_use]
    pub fn echoed_code(&self) -> Option<String> {
        let start = self.body.find("data-otp=\"")? + "data-otp=\"".len();
        let code = self.body.get(start..start + 6)?;
        code.chars()
            .all(|c| c.is_ascii_digit())
            .then(|| code.to_string())
    }
}

impl TestApp {
    /// App with the static dashboard data.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    #[must_use]
    pub fn with_config(config: SiteConfig) -> Self {
        let state = AppState::new(config).unwrap();
        Self::from_state(state)
    }

    /// App with a custom dashboard data provider.
    #[must_use]
    pub fn with_dashboard_data(provider: Arc<dyn DashboardData>) -> Self {
        let state = AppState::with_dashboard_data(test_config(), provider).unwrap();
        Self::from_state(state)
    }

    fn from_state(state: AppState) -> Self {
        let store = MemoryStore::default();
        Self {
            router: easemyform_site::app_with_session_store(state, store.clone()),
            store,
        }
    }

    /// Store `state` as a session and return its cookie.
    pub async fn session_cookie(&self, state: &SessionState) -> String {
        let mut record = Record {
            id: Id::default(),
            data: [(
                keys::SESSION_STATE.to_string(),
                serde_json::to_value(state).unwrap(),
            )]
            .into_iter()
            .collect(),
            expiry_date: OffsetDateTime::now_utc() + CookieDuration::days(1),
        };
        self.store.create(&mut record).await.unwrap();
        format!("{SESSION_COOKIE_NAME}={}", record.id)
    }

    /// Send a request and buffer the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Send a request as if it arrived on a socket from `peer`.
    pub async fn send_from(&self, peer: SocketAddr, mut request: Request<Body>) -> TestResponse {
        request.extensions_mut().insert(ConnectInfo(peer));
        self.send(request).await
    }

    /// POST an urlencoded form body.
    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> TestResponse {
        self.send(form_request(path, body, cookie)).await
    }

    /// POST an urlencoded form body from the socket peer `peer`.
    pub async fn post_form_from(
        &self,
        peer: SocketAddr,
        path: &str,
        body: &str,
        cookie: Option<&str>,
    ) -> TestResponse {
        self.send_from(peer, form_request(path, body, cookie)).await
    }

    /// POST a single-file multipart upload under the field `file`.
    pub async fn upload(&self, path: &str, filename: &str, contents: &[u8]) -> TestResponse {
        self.upload_as(path, filename, contents, None).await
    }

    /// Upload with a session cookie.
    pub async fn upload_as(
        &self,
        path: &str,
        filename: &str,
        contents: &[u8],
        cookie: Option<&str>,
    ) -> TestResponse {
        const BOUNDARY: &str = "easemyform-test-boundary";
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder().method("POST").uri(path).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Run the phone login flow and return the logged-in session cookie
    /// along with the verify response.
    pub async fn login(&self, name: &str, phone: &str) -> (String, TestResponse) {
        let body = format!("name={name}&phone={}", phone.replace('+', "%2B"));
        let requested = self.post_form("/login", &body, None).await;
        assert_eq!(requested.status, StatusCode::OK, "{}", requested.body);

        let pending_cookie = requested.session_cookie().unwrap();
        let code = requested.echoed_code().unwrap();

        let verified = self
            .post_form(
                "/login/verify",
                &format!("code={code}"),
                Some(&pending_cookie),
            )
            .await;
        let cookie = verified.session_cookie().unwrap_or(pending_cookie);
        (cookie, verified)
    }
}

fn form_request(path: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
