//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Central tool registry and the dispatcher used by every transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/calcom/` (e.g., `reschedule.rs`)
//! 2. Define params, `to_tool()` and `execute()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add it to `tool_names()`, `get_all_tools()` and `dispatch()` in `registry.rs`

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::ToolRegistry;
