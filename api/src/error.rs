//! Error types for the campus events API client

use thiserror::Error;

/// Errors that can occur when talking to the campus events backend
///
/// The `Display` output of [`ApiError::Status`] is the backend's own message,
/// so it can be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` or `error` from the response body, else `HTTP <status>`
        message: String,
    },

    /// A 2xx response body did not match the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The configured base URL cannot be used
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Build a status error from a response body
    ///
    /// Prefers the body's `message` field, then `error`, then falls back to
    /// `HTTP <status>`.
    #[must_use]
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error"].iter().find_map(|key| {
                    value
                        .get(key)
                        .and_then(serde_json::Value::as_str)
                        .filter(|text| !text.is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        Self::Status { status, message }
    }

    /// HTTP status code, when the backend answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidBaseUrl(_) => None,
        }
    }
}

/// Convenience alias for results returned by the API client
pub type ApiResult<T> = Result<T, ApiError>;
