//! Domains module containing business logic organized by bounded contexts.
//!
//! - **calendar**: Rate limiting and the Cal.com booking client
//! - **tools**: The MCP tools and their dispatcher

pub mod calendar;
pub mod tools;
