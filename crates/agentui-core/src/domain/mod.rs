//! Core domain types.
//!
//! Pure data types with no infrastructure dependencies:
//!
//! - `mcp` - catalog servers and tools
//! - `selection` - per-entity opt-ins and overrides
//! - `resolved` - the flattened runtime configuration and its warnings
//! - `entity` - Agents and Skills that own selections

pub mod entity;
pub mod mcp;
pub mod resolved;
pub mod selection;

pub use entity::{Entity, EntityKind, NewEntity};
pub use mcp::{McpEnvEntry, McpServer, McpTool, McpTransport, NewMcpServer, NewMcpTool};
pub use resolved::{OverrideField, ResolutionWarning, ResolvedConfig, ResolvedServer, ResolvedTool};
pub use selection::{Override, ServerSelection, ToolSelection};
