//! Error types and handling for the MCP server.
//!
//! Only startup can fail at this level: tool failures are rendered as
//! error-flagged results by the dispatcher, and transports report their
//! own [`TransportError`](super::transport::TransportError).

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum Error {
    /// The booking provider could not be set up.
    #[error("Provider error: {0}")]
    Provider(#[from] crate::domains::calendar::ProviderError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::calendar::ProviderError;

    #[test]
    fn test_provider_error_converts() {
        let err: Error = ProviderError::Client("no TLS backend".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Provider error: Failed to build HTTP client: no TLS backend"
        );
    }
}
