//! Front-end configuration loaded from the environment
//!
//! Backend settings come from [`ApiConfig`]; this adds the log filter and
//! how long the command line waits for a workflow step to finish.

use eventhub_api::{ApiConfig, ApiError};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the workflow wait timeout in seconds
pub const WAIT_TIMEOUT_VAR: &str = "EVENTHUB_WAIT_TIMEOUT_SECS";

/// Environment variable holding the log filter
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "eventhub=info";

/// Wait timeout used when nothing is configured
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Backend settings were rejected
    #[error("invalid backend configuration: {0}")]
    Api(#[from] ApiError),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend connection settings
    pub api: ApiConfig,
    /// `tracing` filter directive
    pub log_filter: String,
    /// How long to wait for a store to report a result
    pub wait_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Api`] if the backend base URL is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Api`] if the backend base URL is unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiConfig::from_lookup(&lookup)?;

        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let wait_timeout = lookup(WAIT_TIMEOUT_VAR)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_WAIT_TIMEOUT, Duration::from_secs);

        Ok(Self {
            api,
            log_filter,
            wait_timeout,
        })
    }

    /// Replace the backend base URL, keeping the configured timeout
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Api`] if the URL is not an `http(s)` URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.api = ApiConfig::new(base_url)?.with_timeout(self.api.timeout());
        Ok(self)
    }
}
