//! Connection settings for a single n8n instance.

use std::fmt;
use std::time::Duration;

use crate::error::CoreError;

/// Env var holding the n8n API key.
pub const ENV_TOKEN: &str = "N8N_API_TOKEN";

/// Env var holding the workflow endpoint URL.
pub const ENV_URL: &str = "N8N_URL";

/// Env var overriding the per-request timeout.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "N8N_REQUEST_TIMEOUT_SECS";

/// Default per-request timeout applied to every call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Token and endpoint used to address and authenticate every call.
///
/// Built once, then shared read-only. Construction accepts any strings,
/// empty ones included; call [`validate`](Self::validate) to opt into
/// stricter checks.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    token: String,
    base_url: String,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with the default request timeout.
    ///
    /// * `token`    - value sent in the `X-N8N-API-KEY` header.
    /// * `base_url` - workflow collection URL, e.g. `https://host/api/v1/workflows`.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Replace the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `N8N_API_TOKEN`            | --      |
    /// | `N8N_URL`                  | --      |
    /// | `N8N_REQUEST_TIMEOUT_SECS` | `30`    |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN)
            .ok_or_else(|| CoreError::Config(format!("{ENV_TOKEN} must be set")))?;
        let base_url =
            lookup(ENV_URL).ok_or_else(|| CoreError::Config(format!("{ENV_URL} must be set")))?;

        let timeout_secs = match lookup(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(CoreError::Config(format!(
                        "{ENV_REQUEST_TIMEOUT_SECS} must be a positive integer, got {raw:?}"
                    )))
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self::new(token, base_url).with_request_timeout(Duration::from_secs(timeout_secs)))
    }

    /// Reject an empty token, a zero timeout, an empty URL, or a URL that
    /// is not absolute `http`/`https`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.token.trim().is_empty() {
            return Err(CoreError::Validation("token must not be empty".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(CoreError::Validation("request timeout must be non-zero".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Validation("url must not be empty".into()));
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| CoreError::Validation(format!("url {:?} is invalid: {e}", self.base_url)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(CoreError::Validation(format!(
                "url scheme must be http or https, got {other:?}"
            ))),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
