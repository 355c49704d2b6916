//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - The dispatcher shared by every transport
//! - Tool metadata for listing
//!
//! Dispatch never fails. Every error becomes an error-flagged text result:
//! `Error: {message}` for argument, rate-limit and provider failures, and a
//! bare `Unknown tool: {name}` for unrecognized names.

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{info, warn};

use super::ToolError;
use super::definitions::calcom::common::{error_result, parse_params, success_result};
use super::definitions::{
    AddAppointmentTool, DeleteAppointmentTool, ListAppointmentsTool, UpdateAppointmentTool,
};
use crate::domains::calendar::CalendarService;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching tool calls from any transport
#[derive(Clone)]
pub struct ToolRegistry {
    service: CalendarService,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(service: CalendarService) -> Self {
        Self { service }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            AddAppointmentTool::NAME,
            UpdateAppointmentTool::NAME,
            DeleteAppointmentTool::NAME,
            ListAppointmentsTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            AddAppointmentTool::to_tool(),
            UpdateAppointmentTool::to_tool(),
            DeleteAppointmentTool::to_tool(),
            ListAppointmentsTool::to_tool(),
        ]
    }

    /// Dispatch a tool call and render its result.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!(tool = name, "Dispatching tool call");

        match self.dispatch(name, arguments).await {
            Ok(text) => success_result(text),
            Err(e @ ToolError::UnknownTool(_)) => {
                warn!("Unknown tool requested: {}", name);
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
            Err(e) => error_result(&format!("Error: {e}")),
        }
    }

    async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> Result<String, ToolError> {
        let arguments = arguments.ok_or(ToolError::MissingArguments)?;

        match name {
            AddAppointmentTool::NAME => {
                AddAppointmentTool::execute(parse_params(name, arguments)?, &self.service).await
            }
            UpdateAppointmentTool::NAME => {
                UpdateAppointmentTool::execute(parse_params(name, arguments)?, &self.service).await
            }
            DeleteAppointmentTool::NAME => {
                DeleteAppointmentTool::execute(parse_params(name, arguments)?, &self.service).await
            }
            ListAppointmentsTool::NAME => {
                ListAppointmentsTool::execute(parse_params(name, arguments)?, &self.service).await
            }
            _ => Err(ToolError::unknown_tool(name)),
        }
    }
}
