//! Cal.com Calendar MCP Server Library
//!
//! This crate exposes Cal.com appointment management (create, update,
//! delete, list) as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **calendar**: Fixed-window rate limiter, `BookingProvider` trait and Cal.com client
//!   - **tools**: Tool definitions and the dispatcher that renders text results
//!
//! # Example
//!
//! ```rust,no_run
//! use calcom_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
