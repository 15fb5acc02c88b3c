//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_BASE_URL` - Public URL for the site
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 5000)
//! - `ADMIN_PHONE` - Phone number granted the admin flag on login (default: nobody)
//! - `OTP_EXPIRY_MINUTES` - Lifetime of a login code (default: 5)
//! - `OTP_ECHO` - Show login codes on the page instead of sending them (default: false)
//! - `MAX_FILE_SIZE` - Upload limit for the ATS checker in bytes (default: 10 MiB)
//! - `DASHBOARD_DATA_TIMEOUT_MS` - Deadline for dashboard data (default: 1500)
//! - `RATE_LIMIT_ENABLED` - Rate limit login routes (default: true)
//! - `TRUST_PROXY_HEADERS` - Key the rate limiter on proxy client-IP headers (default: false)
//! - `SITE_CONTENT_DIR` - Markdown content directory (default: crates/site/content)
//! - `SITE_STATIC_DIR` - Static asset directory (default: crates/site/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use easemyform_core::PhoneNumber;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
///
/// Implements `Debug` manually to redact the admin phone number.
#[derive(Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Canonical phone number that receives the admin flag
    pub admin_phone: Option<SecretString>,
    /// Lifetime of an issued login code
    pub otp_expiry: Duration,
    /// Render login codes on the verify page (no SMS gateway)
    pub otp_echo: bool,
    /// Upload limit for résumé files, in bytes
    pub max_file_size: usize,
    /// How long a dashboard waits for its data before showing the loading page
    pub dashboard_data_timeout: Duration,
    /// Whether the login routes are rate limited
    pub rate_limit_enabled: bool,
    /// Whether the rate limiter trusts proxy client-IP headers.
    /// Only safe behind a proxy that overwrites them.
    pub trust_proxy_headers: bool,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Static asset directory
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field(
                "admin_phone",
                &self.admin_phone.as_ref().map(|_| "[REDACTED]"),
            )
            .field("otp_expiry", &self.otp_expiry)
            .field("otp_echo", &self.otp_echo)
            .field("max_file_size", &self.max_file_size)
            .field("dashboard_data_timeout", &self.dashboard_data_timeout)
            .field("rate_limit_enabled", &self.rate_limit_enabled)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .field("content_dir", &self.content_dir)
            .field("static_dir", &self.static_dir)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish_non_exhaustive()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("SITE_BASE_URL")?;
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_BASE_URL".to_string(), e.to_string()))?;

        let admin_phone = get_optional_env("ADMIN_PHONE")
            .map(|raw| {
                PhoneNumber::parse(&raw)
                    .map(|phone| SecretString::from(phone.as_str().to_owned()))
                    .map_err(|e| {
                        ConfigError::InvalidEnvVar("ADMIN_PHONE".to_string(), e.to_string())
                    })
            })
            .transpose()?;

        Ok(Self {
            host: parse_env_or_default("SITE_HOST", "127.0.0.1")?,
            port: parse_env_or_default("SITE_PORT", "5000")?,
            base_url,
            admin_phone,
            otp_expiry: Duration::from_secs(
                parse_env_or_default::<u64>("OTP_EXPIRY_MINUTES", "5")? * 60,
            ),
            otp_echo: parse_env_or_default("OTP_ECHO", "false")?,
            max_file_size: parse_env_or_default(
                "MAX_FILE_SIZE",
                &DEFAULT_MAX_FILE_SIZE.to_string(),
            )?,
            dashboard_data_timeout: Duration::from_millis(parse_env_or_default(
                "DASHBOARD_DATA_TIMEOUT_MS",
                "1500",
            )?),
            rate_limit_enabled: parse_env_or_default("RATE_LIMIT_ENABLED", "true")?,
            trust_proxy_headers: parse_env_or_default("TRUST_PROXY_HEADERS", "false")?,
            content_dir: get_env_or_default("SITE_CONTENT_DIR", "crates/site/content").into(),
            static_dir: get_env_or_default("SITE_STATIC_DIR", "crates/site/static").into(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Whether `phone` is the configured admin number.
    ///
    /// Always false when no admin number is configured.
    #[must_use]
    pub fn is_admin_phone(&self, phone: &PhoneNumber) -> bool {
        self.admin_phone
            .as_ref()
            .is_some_and(|admin| admin.expose_secret() == phone.as_str())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
