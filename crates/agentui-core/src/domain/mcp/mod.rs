//! MCP (Model Context Protocol) catalog domain types.
//!
//! These types represent the centrally-stored MCP server and tool
//! definitions, independent of any infrastructure concerns (database,
//! process management, etc.).
//!
//! # Design
//!
//! - `McpServer` - A persisted catalog server with ID
//! - `NewMcpServer` - A catalog server to be inserted (no ID yet)
//! - `McpTransport` - Connection type (stdio, SSE or streamable HTTP)
//! - `McpEnvEntry` - Environment variable entry
//! - `McpTool` - A persisted tool owned by a catalog server
//! - `NewMcpTool` - A tool to be inserted (no ID yet)

mod types;

pub use types::{McpEnvEntry, McpServer, McpTool, McpTransport, NewMcpServer, NewMcpTool};
