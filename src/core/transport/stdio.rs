//! STDIO transport implementation.
//!
//! The host process spawns the server and speaks MCP over stdin/stdout.
//! Nothing else may write to stdout; logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single client over stdin/stdout until it disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let running = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(TransportError::init)?;

        let reason = running.waiting().await.map_err(TransportError::service)?;

        info!(?reason, "STDIO transport finished");
        Ok(())
    }
}
