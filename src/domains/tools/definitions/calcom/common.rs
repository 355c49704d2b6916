//! Common utilities shared across the Cal.com tools.
//!
//! Argument parsing, tool metadata construction, and result envelopes.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domains::tools::ToolError;

/// Placeholder for booking fields the provider left out.
pub const MISSING_FIELD: &str = "N/A";

/// Deserialize a tool's argument object into its typed parameters.
///
/// Missing required keys and type mismatches both map to
/// [`ToolError::InvalidArguments`] naming the tool.
pub fn parse_params<T: DeserializeOwned>(tool: &str, arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments)).map_err(|e| {
        debug!(tool, "Argument validation failed: {}", e);
        ToolError::invalid_arguments(tool)
    })
}

/// Build the MCP tool model for a parameter type.
pub fn tool_model<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Treat empty strings like absent values.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Render an optional field, falling back to [`MISSING_FIELD`].
pub fn or_missing<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_FIELD.to_string())
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}
