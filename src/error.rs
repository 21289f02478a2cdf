//! Error types for the API client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the API client.
///
/// Errors are `Clone` because a single in-flight read may be awaited by many
/// callers, and each of them receives the same outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, timeout, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the server's text body, or `Error <status>` when the body is empty.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A JSON response body could not be parsed
    #[error("Malformed response body: {0}")]
    Parse(String),

    /// The response could not be turned into the caller's type
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The request could not be built (bad path, unserializable body, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Internal client error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    // == Status Error ==
    /// Builds a status error from a non-2xx response body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).trim().to_string();
        let message = if text.is_empty() {
            format!("Error {}", status)
        } else {
            text
        };
        ApiError::Status { status, message }
    }

    /// Returns the HTTP status for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the API client.
pub type Result<T> = std::result::Result<T, ApiError>;
