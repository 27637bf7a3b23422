use thiserror::Error;

/// Failure reported by the remote issue tracker port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The tracker answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Returns the HTTP status when the tracker answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns whether the tracker rejected the request as malformed (HTTP 400).
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }
}

/// Result type returned by remote tracker ports.
pub type RemoteResult<T> = Result<T, RemoteError>;
