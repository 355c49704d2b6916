//! Calendar-specific error types.

use thiserror::Error;

use super::rate_limit::RateWindow;

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failures of a single outbound call to the booking provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never completed (DNS, connect, TLS, body read).
    #[error("{0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// A success response whose body could not be understood.
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ProviderError {
    /// Create an HTTP status error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

/// The four appointment operations, as named in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    List,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            Self::Create => "create appointment",
            Self::Update => "update appointment",
            Self::Delete => "delete appointment",
            Self::List => "list appointments",
        };
        f.write_str(action)
    }
}

/// Errors raised by the calendar service.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Burst or daily budget exhausted.
    #[error("Rate limit exceeded")]
    RateLimitExceeded(RateWindow),

    /// The provider call failed.
    #[error("Failed to {operation}: {source}")]
    Provider {
        operation: Operation,
        #[source]
        source: ProviderError,
    },
}

impl CalendarError {
    /// Wrap a provider failure for the given operation.
    pub fn provider(operation: Operation, source: ProviderError) -> Self {
        Self::Provider { operation, source }
    }
}
