//! Blocking notices raised by form submissions
//!
//! The browser front ends used `alert()` for these. View models queue them in
//! state and the driver shows and drains them.

use std::fmt;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation of a completed step
    Info,
    /// A step failed; the modal stays open
    Error,
}

/// A message the user must acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text to show, usually the backend's own message
    pub message: String,
}

impl Notice {
    /// Informational notice
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Error notice
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this notice reports a failure
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "{}", self.message),
            NoticeLevel::Error => write!(f, "Error: {}", self.message),
        }
    }
}
