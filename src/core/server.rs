//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the [`ToolRegistry`].
//!
//! `list_tools` and `call_tool` are implemented by hand rather than through
//! an rmcp `ToolRouter`: unknown tool names and missing arguments must come
//! back as error-flagged tool results, not protocol errors.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::{Error, Result};
use crate::domains::calendar::{BookingProvider, CalComClient, CalendarService, RateLimiter};
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Manage Cal.com appointments: create, update, delete and list bookings. \
    Times are ISO 8601 date-times; list ranges are YYYY-MM-DD dates.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and hands
/// every tool call to the shared registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool registry and dispatcher.
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server backed by the Cal.com API.
    ///
    /// Fails if the configuration is invalid (e.g. no API key).
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let api_key = config
            .credentials
            .calcom_api_key
            .clone()
            .ok_or_else(|| Error::config("Cal.com API key is missing"))?;
        let client = CalComClient::new(api_key, &config.provider)?;

        Ok(Self::with_provider(config, Arc::new(client)))
    }

    /// Create a server with an explicit booking provider.
    pub fn with_provider(config: Config, provider: Arc<dyn BookingProvider>) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit));
        let service = CalendarService::new(limiter, provider);

        Self {
            config: Arc::new(config),
            registry: ToolRegistry::new(service),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Server instructions sent during initialization.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Tool failures are part of the returned result; `Err` only means the
    /// result could not be serialized.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<serde_json::Value, String> {
        let result = self.registry.call_tool(name, arguments).await;
        serde_json::to_value(&result).map_err(|e| e.to_string())
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self
            .registry
            .call_tool(&request.name, request.arguments)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::calendar::fake::FakeProvider;

    fn server() -> McpServer {
        McpServer::with_provider(Config::default(), Arc::new(FakeProvider::default()))
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(matches!(
            McpServer::new(Config::default()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_list_tools_json() {
        let tools = server().list_tools();
        assert_eq!(tools.len(), 4);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_call_tool_json_envelope() {
        let value = server().call_tool("bogus_tool", Some(JsonObject::new())).await.unwrap();
        assert_eq!(value["isError"], serde_json::json!(true));
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "Unknown tool: bogus_tool");
    }
}
