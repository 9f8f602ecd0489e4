use thiserror::Error;

/// Result type alias for popwatch operations
pub type Result<T> = std::result::Result<T, PopwatchError>;

/// Errors that can occur while building or verifying a PoP registry
#[derive(Error, Debug)]
pub enum PopwatchError {
    /// Directory API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// DNS query failed
    #[error("DNS query failed: {0}")]
    Dns(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid subnet (CIDR) notation
    #[error("invalid subnet: {0}")]
    InvalidSubnet(String),

    /// Registry file is missing or malformed
    #[error("registry error: {0}")]
    Registry(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl PopwatchError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout(_) | Self::Dns(_))
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
