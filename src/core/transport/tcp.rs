//! TCP transport implementation.
//!
//! Line-delimited JSON-RPC over raw TCP. Each accepted connection gets its
//! own MCP session on a spawned task; all sessions share one server, and so
//! one rate limiter.

use rmcp::ServiceExt;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` before trying again.
const ACCEPT_BACKOFF: std::time::Duration = std::time::Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections until the process exits.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                warn!(%peer, "Failed to set TCP_NODELAY: {}", e);
            }

            tokio::spawn(Self::serve_client(server.clone(), stream, peer));
        }
    }

    async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
        info!(%peer, "Client connected");

        let running = match server.serve(stream).await {
            Ok(running) => running,
            Err(e) => {
                warn!(%peer, "MCP handshake failed: {}", e);
                return;
            }
        };

        match running.waiting().await {
            Ok(reason) => info!(%peer, ?reason, "Client disconnected"),
            Err(e) => warn!(%peer, "Session ended with error: {}", e),
        }
    }
}
