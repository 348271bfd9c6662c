//! MCP catalog lookup and repository traits.
//!
//! `McpCatalog` is the narrow read interface the resolver and the
//! frontmatter parser consume. `McpCatalogRepository` extends it with the
//! administrative operations used by the catalog UI and CLI.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mcp::{McpServer, McpTool, NewMcpServer, NewMcpTool};

/// Domain-specific errors for catalog operations.
///
/// This error type abstracts away storage implementation details and provides
/// a clean interface for services to handle catalog storage failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested server or tool was not found.
    #[error("MCP catalog entry not found: {0}")]
    NotFound(String),

    /// A server (or a tool within a server) with the same name already exists.
    #[error("MCP catalog entry already exists: {0}")]
    Conflict(String),

    /// The server is still referenced by at least one Agent or Skill.
    #[error("MCP server '{server}' is still selected by: {}", .referenced_by.join(", "))]
    InUse {
        server: String,
        referenced_by: Vec<String>,
    },

    /// The definition failed validation.
    #[error("Invalid MCP catalog entry: {0}")]
    Invalid(String),

    /// Storage backend error (database, etc.).
    #[error("Storage error: {0}")]
    Internal(String),
}

/// Read-only catalog lookups.
///
/// Absence is reported as `Ok(None)`, never as an error: callers decide
/// whether a missing reference is fatal. `Err` is reserved for storage
/// failures.
#[async_trait]
pub trait McpCatalog: Send + Sync {
    /// Find a catalog server by its unique name.
    async fn find_server_by_name(&self, name: &str) -> Result<Option<McpServer>, CatalogError>;

    /// Find a tool by name within the given server.
    async fn find_tool_by_name(
        &self,
        server_id: i64,
        name: &str,
    ) -> Result<Option<McpTool>, CatalogError>;
}

/// Repository trait for catalog persistence.
///
/// # Design Rules
///
/// - Environment variables are embedded in `McpServer` - no separate env API
/// - Tools belong to exactly one server and are deleted with it
/// - Constraint: unique server `name`; unique tool `name` per server
#[async_trait]
pub trait McpCatalogRepository: McpCatalog {
    /// Insert a new catalog server.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a server with the same name already exists
    /// - `Internal` for storage errors
    async fn insert_server(&self, server: NewMcpServer) -> Result<McpServer, CatalogError>;

    /// Get a catalog server by its database ID.
    async fn get_server(&self, id: i64) -> Result<McpServer, CatalogError>;

    /// List all catalog servers ordered by name.
    async fn list_servers(&self) -> Result<Vec<McpServer>, CatalogError>;

    /// Flip the administrative disabled flag.
    async fn set_server_disabled(&self, id: i64, disabled: bool) -> Result<(), CatalogError>;

    /// Delete a catalog server and all of its tools.
    ///
    /// Reference checks against Agents/Skills are the caller's concern.
    async fn delete_server(&self, id: i64) -> Result<(), CatalogError>;

    /// Insert a tool under an existing server.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the server does not exist
    /// - `Conflict` if the server already owns a tool with that name
    async fn insert_tool(&self, server_id: i64, tool: NewMcpTool) -> Result<McpTool, CatalogError>;

    /// List the tools owned by a server ordered by name.
    async fn list_tools(&self, server_id: i64) -> Result<Vec<McpTool>, CatalogError>;

    /// Delete a single tool.
    async fn delete_tool(&self, tool_id: i64) -> Result<(), CatalogError>;
}
