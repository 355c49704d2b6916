//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that end a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not listen on the configured address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake with the client failed.
    #[error("Server initialization error: {0}")]
    Init(String),

    /// The rmcp service stopped with an error.
    #[error("Service error: {0}")]
    Service(String),

    /// The HTTP server stopped with an error.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    /// Create an initialization error.
    pub fn init(msg: impl ToString) -> Self {
        Self::Init(msg.to_string())
    }

    /// Create a service error.
    pub fn service(msg: impl ToString) -> Self {
        Self::Service(msg.to_string())
    }

    /// Create an HTTP error.
    pub fn http(msg: impl ToString) -> Self {
        Self::Http(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_address() {
        let err = TransportError::bind(
            "127.0.0.1:8080",
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to bind to 127.0.0.1:8080: address in use"
        );
    }
}
