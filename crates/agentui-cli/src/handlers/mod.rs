//! Command handlers that delegate to the MCP configuration service.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call `McpConfigService` methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT access repositories directly or hold business logic.

pub mod entity;
pub mod export;
pub mod import;
pub mod paths;
pub mod resolve;
pub mod server;
pub mod tool;
