//! Conversion between selections and the flat `mcp_tools` map.

use std::collections::HashSet;

use indexmap::IndexMap;

use agentui_core::{
    CatalogError, McpCatalog, ResolutionWarning, ResolvedConfig, ServerSelection, ToolSelection,
};

/// The exported `mcp_tools` shape: server name to ordered tool names.
pub type McpToolsMap = IndexMap<String, Vec<String>>;

/// Selections rebuilt from an `mcp_tools` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSelections {
    /// One enabled selection per server that exists in the catalog.
    pub selections: Vec<ServerSelection>,
    /// Names that could not be matched against the catalog.
    pub warnings: Vec<ResolutionWarning>,
}

/// Flatten a selection list into the `mcp_tools` map.
///
/// Only enabled selections and enabled tools are emitted. A server selected
/// more than once keeps its first enabled selection, matching the resolver.
/// Tool names are emitted once each, and servers without tools are dropped.
pub fn format_selections(selections: &[ServerSelection]) -> McpToolsMap {
    let mut map = McpToolsMap::new();

    for selection in selections.iter().filter(|s| s.enabled) {
        if map.contains_key(&selection.mcp_server) {
            continue;
        }

        let mut seen = HashSet::new();
        let tools: Vec<String> = selection
            .enabled_tool_names()
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect();

        map.insert(selection.mcp_server.clone(), tools);
    }

    map.retain(|_, tools| !tools.is_empty());
    map
}

/// Flatten an already resolved config into the `mcp_tools` map.
pub fn format_resolved(config: &ResolvedConfig) -> McpToolsMap {
    config
        .servers
        .iter()
        .filter(|server| !server.tools.is_empty())
        .map(|server| {
            (
                server.name.clone(),
                server.tool_names().map(str::to_string).collect(),
            )
        })
        .collect()
}

/// Rebuild selections from an `mcp_tools` map.
///
/// Unknown servers and tools are skipped with a warning. A server whose
/// tools are all unknown produces no selection.
pub async fn parse_mcp_tools<C>(
    catalog: &C,
    map: &McpToolsMap,
) -> Result<ParsedSelections, CatalogError>
where
    C: McpCatalog + ?Sized,
{
    let mut parsed = ParsedSelections::default();

    for (server_name, tool_names) in map {
        let Some(server) = catalog.find_server_by_name(server_name).await? else {
            tracing::warn!(server_name = %server_name, "Imported MCP server not in catalog");
            parsed.warnings.push(ResolutionWarning::DanglingServer {
                server: server_name.clone(),
            });
            continue;
        };

        let mut selection = ServerSelection::new(server.name.clone());
        for tool_name in tool_names {
            if selection
                .selected_tools
                .iter()
                .any(|t| &t.mcp_tool == tool_name)
            {
                parsed.warnings.push(ResolutionWarning::DuplicateToolSelection {
                    server: server.name.clone(),
                    tool: tool_name.clone(),
                });
                continue;
            }

            if catalog.find_tool_by_name(server.id, tool_name).await?.is_none() {
                tracing::warn!(
                    server_name = %server.name,
                    tool_name = %tool_name,
                    "Imported MCP tool not provided by server"
                );
                parsed.warnings.push(ResolutionWarning::DanglingTool {
                    server: server.name.clone(),
                    tool: tool_name.clone(),
                });
                continue;
            }

            selection
                .selected_tools
                .push(ToolSelection::new(tool_name.clone()));
        }

        if !selection.selected_tools.is_empty() {
            parsed.selections.push(selection);
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentui_core::{McpCatalogRepository, NewMcpServer, NewMcpTool};

    use crate::memory::InMemoryCatalog;

    fn tools_map(entries: &[(&str, &[&str])]) -> McpToolsMap {
        entries
            .iter()
            .map(|(server, tools)| {
                (
                    (*server).to_string(),
                    tools.iter().map(|t| (*t).to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_format_scenario() {
        let selections = vec![
            ServerSelection::new("filesystem")
                .with_tool("read_file")
                .with_tool_selection(ToolSelection::new("write_file").with_enabled(false)),
            ServerSelection::new("git").with_tool("commit").with_enabled(false),
        ];

        assert_eq!(
            format_selections(&selections),
            tools_map(&[("filesystem", &["read_file"])])
        );
    }

    #[test]
    fn test_format_dedups_tools_and_drops_empty_servers() {
        let selections = vec![
            ServerSelection::new("filesystem")
                .with_tool("read_file")
                .with_tool("write_file")
                .with_tool("read_file"),
            ServerSelection::new("git"),
        ];

        assert_eq!(
            format_selections(&selections),
            tools_map(&[("filesystem", &["read_file", "write_file"])])
        );
    }

    #[test]
    fn test_format_keeps_first_enabled_duplicate() {
        let selections = vec![
            ServerSelection::new("git").with_tool("push").with_enabled(false),
            ServerSelection::new("git").with_tool("commit"),
            ServerSelection::new("git").with_tool("log"),
        ];

        assert_eq!(
            format_selections(&selections),
            tools_map(&[("git", &["commit"])])
        );
    }

    #[tokio::test]
    async fn test_parse_skips_unknown_names() {
        let catalog = InMemoryCatalog::new();
        let fs = catalog
            .insert_server(NewMcpServer::new_stdio("filesystem", "npx", vec![]))
            .await
            .unwrap();
        catalog.insert_tool(fs.id, NewMcpTool::new("read_file")).await.unwrap();

        let map = tools_map(&[
            ("filesystem", &["read_file", "chmod"]),
            ("browser", &["navigate"]),
        ]);
        let parsed = parse_mcp_tools(&catalog, &map).await.unwrap();

        assert_eq!(parsed.selections.len(), 1);
        assert_eq!(parsed.selections[0].selected_tools.len(), 1);
        assert!(parsed.selections[0].selected_tools[0].enabled);
        assert_eq!(
            parsed.warnings,
            vec![
                ResolutionWarning::DanglingTool {
                    server: "filesystem".to_string(),
                    tool: "chmod".to_string()
                },
                ResolutionWarning::DanglingServer {
                    server: "browser".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_parse_propagates_storage_errors() {
        use mockall::mock;

        mock! {
            Catalog {}

            #[async_trait::async_trait]
            impl McpCatalog for Catalog {
                async fn find_server_by_name(
                    &self,
                    name: &str,
                ) -> Result<Option<agentui_core::McpServer>, CatalogError>;
                async fn find_tool_by_name(
                    &self,
                    server_id: i64,
                    name: &str,
                ) -> Result<Option<agentui_core::McpTool>, CatalogError>;
            }
        }

        let mut catalog = MockCatalog::new();
        catalog
            .expect_find_server_by_name()
            .returning(|_| Err(CatalogError::Internal("database is locked".to_string())));

        let map = tools_map(&[("filesystem", &["read_file"])]);
        let result = parse_mcp_tools(&catalog, &map).await;

        assert!(matches!(result, Err(CatalogError::Internal(_))));
    }
}
