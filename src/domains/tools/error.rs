//! Tool-specific error types.

use thiserror::Error;

use crate::domains::calendar::CalendarError;

/// Errors that can occur while dispatching a tool call.
///
/// The dispatcher renders every variant as an error-flagged text result.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The call carried no argument object at all.
    #[error("No arguments provided")]
    MissingArguments,

    /// Required keys were absent or had the wrong type.
    #[error("Invalid arguments for {0}")]
    InvalidArguments(String),

    /// A field was present but its value could not be used.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Rate limiting or provider failure.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ToolError {
    /// Create a new "invalid arguments" error for a tool.
    pub fn invalid_arguments(tool: impl Into<String>) -> Self {
        Self::InvalidArguments(tool.into())
    }

    /// Create a new "invalid value" error.
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}
