//! Shared primitives for all Rust crates in youtrack-mcp.

#![forbid(unsafe_code)]

/// Errors reported by the remote issue tracker.
pub mod remote;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use remote::{RemoteError, RemoteResult};

/// Result type used across youtrack-mcp crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or a denied work item precondition.
    #[error("{0}")]
    Validation(String),

    /// Missing or inconsistent runtime configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Requested resource does not exist on the tracker.
    #[error("not found: {0}")]
    NotFound(String),

    /// The tracker rejected or failed a request.
    #[error("remote error: {0}")]
    Remote(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether this error is a caller-visible validation denial.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<RemoteError> for AppError {
    fn from(value: RemoteError) -> Self {
        match value {
            RemoteError::Status { status: 404, body } => Self::NotFound(body),
            other => Self::Remote(other.to_string()),
        }
    }
}
