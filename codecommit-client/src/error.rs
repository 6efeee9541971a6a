//! Error types for the repository client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the repository service
///
/// The `Display` text of a service error is the service's own message, so
/// it can be surfaced to users as is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service rejected the request
    #[error("{message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Service error code (e.g. `RepositoryDoesNotExistException`)
        code: String,
        /// Error message from the service
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Repository not found
    #[error("Repository not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("{0}")]
    InternalError(String),
}

impl ClientError {
    /// Create a service error from status code, error code and message
    pub fn service(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if this error means the repository does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
            || matches!(self, Self::Service { code, .. } if code == "RepositoryDoesNotExistException")
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Service { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Service { status, .. } if *status >= 500)
    }
}
