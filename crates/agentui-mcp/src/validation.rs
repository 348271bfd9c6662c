//! Write-time checks for selection lists.
//!
//! Resolution tolerates stale references; saving does not. These checks
//! run before an entity is persisted so new data never carries a duplicate
//! server or tool, an unknown server, a tool owned by a different server,
//! or a startup timeout above the accepted maximum.

use std::collections::HashSet;

use thiserror::Error;

use agentui_core::{CatalogError, MAX_STARTUP_TIMEOUT_MS, McpCatalog, Override, ServerSelection};

/// A selection list that must not be persisted.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("MCP server '{0}' is selected more than once")]
    DuplicateServer(String),

    #[error("MCP server '{0}' is not in the catalog")]
    UnknownServer(String),

    #[error("MCP tool '{tool}' is not provided by server '{server}'")]
    ToolNotOwned { server: String, tool: String },

    #[error("MCP tool '{tool}' is selected more than once under server '{server}'")]
    DuplicateTool { server: String, tool: String },

    #[error("Startup timeout for server '{server}' must be at most {max} ms, got {value}")]
    TimeoutOutOfRange { server: String, value: u64, max: u64 },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Check a selection list against the catalog.
///
/// Disabled selections are still checked: they are persisted and may be
/// re-enabled later.
pub async fn validate_selections<C>(
    catalog: &C,
    selections: &[ServerSelection],
) -> Result<(), SelectionError>
where
    C: McpCatalog + ?Sized,
{
    let mut servers = HashSet::new();

    for selection in selections {
        if !servers.insert(selection.mcp_server.as_str()) {
            return Err(SelectionError::DuplicateServer(selection.mcp_server.clone()));
        }

        if let Some(Override::Value(value)) = selection.custom_startup_timeout_ms {
            if value > MAX_STARTUP_TIMEOUT_MS {
                return Err(SelectionError::TimeoutOutOfRange {
                    server: selection.mcp_server.clone(),
                    value,
                    max: MAX_STARTUP_TIMEOUT_MS,
                });
            }
        }

        let server = catalog
            .find_server_by_name(&selection.mcp_server)
            .await?
            .ok_or_else(|| SelectionError::UnknownServer(selection.mcp_server.clone()))?;

        let mut tools = HashSet::new();
        for tool in &selection.selected_tools {
            if !tools.insert(tool.mcp_tool.as_str()) {
                return Err(SelectionError::DuplicateTool {
                    server: server.name.clone(),
                    tool: tool.mcp_tool.clone(),
                });
            }

            if catalog
                .find_tool_by_name(server.id, &tool.mcp_tool)
                .await?
                .is_none()
            {
                return Err(SelectionError::ToolNotOwned {
                    server: server.name.clone(),
                    tool: tool.mcp_tool.clone(),
                });
            }
        }
    }

    Ok(())
}
