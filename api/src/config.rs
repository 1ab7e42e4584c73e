//! Connection settings for the campus events backend

use crate::error::ApiError;
use std::time::Duration;

/// Base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Request timeout used when nothing is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the backend base URL
pub const BASE_URL_VAR: &str = "EVENTHUB_API_BASE_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_VAR: &str = "EVENTHUB_API_TIMEOUT_SECS";

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Create settings for a base URL
    ///
    /// A trailing `/` is trimmed so paths can be appended directly.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] unless the URL is an absolute
    /// `http` or `https` URL with a host.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');

        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if host.is_empty() || host.starts_with('/') {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Load settings from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `EVENTHUB_API_BASE_URL` is set
    /// to something that is not an `http(s)` URL.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    ///
    /// Unset or blank variables fall back to the defaults; an unparsable
    /// timeout falls back to [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] for an unusable base URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = lookup(TIMEOUT_VAR)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Self::new(&base_url)?.with_timeout(timeout))
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
