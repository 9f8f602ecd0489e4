use thiserror::Error;

/// Result type alias for probe operations
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

/// Errors from probe construction and transport
#[derive(Error, Debug)]
pub enum ProbeError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(String),

    /// DNS query error
    #[error("DNS error: {0}")]
    Dns(String),

    /// Invalid domain name
    #[error("invalid name: {0}")]
    Name(String),

    /// Network I/O error
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// Timeout
    #[error("operation timed out")]
    Timeout,
}

impl From<ProbeError> for popwatch_core::PopwatchError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Http(msg) => Self::Http(msg),
            ProbeError::Dns(msg) => Self::Dns(msg),
            ProbeError::Name(msg) => Self::Config(msg),
            ProbeError::Network(e) => Self::Http(e.to_string()),
            ProbeError::Timeout => Self::Timeout(0),
        }
    }
}
