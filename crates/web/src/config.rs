//! Front-end configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BIZSPHERE_API_URL` - Base URL of the BizSphere REST API (e.g. `http://localhost:5000/api`)
//!
//! ## Optional
//! - `BIZSPHERE_HOST` - Bind address (default: 127.0.0.1)
//! - `BIZSPHERE_PORT` - Listen port (default: 3000)
//! - `BIZSPHERE_BASE_URL` - Public URL of this front-end (default: `http://localhost:3000`)
//! - `BIZSPHERE_HEALTH_URL` - Backend health endpoint (default: API origin + `/health`)
//! - `BIZSPHERE_API_TIMEOUT_SECS` - Whole-request timeout for API calls (default: 15)
//! - `BIZSPHERE_API_CONNECT_TIMEOUT_SECS` - Connect timeout for API calls (default: 5)
//! - `BIZSPHERE_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Front-end application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the front-end
    pub base_url: String,
    /// Remote API configuration
    pub api: ApiConfig,
    /// Emit JSON formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors reported to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced by Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Settings for the remote BizSphere REST API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against. Always ends with `/`.
    pub base_url: Url,
    /// Diagnostic health endpoint (outside the API prefix).
    pub health_url: Url,
    /// Upper bound on a whole request, so a hung backend never hangs a page.
    pub timeout: Duration,
    /// Upper bound on establishing a connection.
    pub connect_timeout: Duration,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("BIZSPHERE_HOST", "127.0.0.1", |v| v.parse::<IpAddr>())?;
        let port = parse_env("BIZSPHERE_PORT", "3000", |v| v.parse::<u16>())?;
        let base_url = get_env_or_default("BIZSPHERE_BASE_URL", "http://localhost:3000");
        parse_http_url("BIZSPHERE_BASE_URL", &base_url)?;

        Ok(Self {
            host,
            port,
            base_url,
            api: ApiConfig::from_env()?,
            log_json: get_optional_env("BIZSPHERE_LOG_JSON").is_some(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0", |v| v.parse::<f32>())?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0", |v| {
                v.parse::<f32>()
            })?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = api_base_url(&get_required_env("BIZSPHERE_API_URL")?)?;
        let health_url = match get_optional_env("BIZSPHERE_HEALTH_URL") {
            Some(raw) => parse_http_url("BIZSPHERE_HEALTH_URL", &raw)?,
            None => default_health_url(&base_url)?,
        };

        Ok(Self {
            base_url,
            health_url,
            timeout: parse_secs("BIZSPHERE_API_TIMEOUT_SECS", "15")?,
            connect_timeout: parse_secs("BIZSPHERE_API_CONNECT_TIMEOUT_SECS", "5")?,
        })
    }

    /// Build an API configuration pointing at `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not an http(s) URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = api_base_url(base_url)?;
        let health_url = default_health_url(&base_url)?;
        Ok(Self {
            base_url,
            health_url,
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Read an environment variable (or its default) and parse it.
fn parse_env<T, E, F>(key: &str, default: &str, parse: F) -> Result<T, ConfigError>
where
    E: std::fmt::Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    let raw = get_env_or_default(key, default);
    parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Read a strictly positive number of seconds.
fn parse_secs(key: &str, default: &str) -> Result<Duration, ConfigError> {
    let secs = parse_env(key, default, |v| v.parse::<u64>())?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

/// Parse a URL and require an http or https scheme.
fn parse_http_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Parse the API base URL, ensuring a trailing slash so relative paths join under it.
fn api_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = parse_http_url("BIZSPHERE_API_URL", raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// The backend serves `/health` at its origin, outside the API prefix.
fn default_health_url(api_base: &Url) -> Result<Url, ConfigError> {
    api_base
        .join("/health")
        .map_err(|e| ConfigError::InvalidEnvVar("BIZSPHERE_HEALTH_URL".to_string(), e.to_string()))
}
