//! Selection resolution against the catalog.

use std::collections::HashSet;

use agentui_core::{
    CatalogError, McpCatalog, McpServer, Override, ResolutionWarning, ResolvedConfig,
    ResolvedServer, ResolvedTool, ResolverSettings, ServerSelection, ToolSelection,
};

use super::overrides::{effective_args, effective_env, effective_startup_timeout};

/// Resolve an entity's selections into its effective MCP configuration.
///
/// Rules:
/// 1. Disabled selections are ignored
/// 2. A server selected twice keeps its first enabled selection
/// 3. Dangling or catalog-disabled servers are skipped with a warning
/// 4. Only tool selections with `enabled = true` that the server owns survive
/// 5. Servers left without tools are omitted
///
/// Missing references never fail resolution. `Err` is returned only when
/// the catalog itself cannot be read.
pub async fn resolve<C>(
    catalog: &C,
    selections: &[ServerSelection],
    settings: &ResolverSettings,
) -> Result<ResolvedConfig, CatalogError>
where
    C: McpCatalog + ?Sized,
{
    let mut warnings = Vec::new();
    let mut servers = Vec::new();
    let mut seen = HashSet::new();

    for selection in selections {
        if !selection.enabled {
            tracing::debug!(server_name = %selection.mcp_server, "Skipping disabled MCP selection");
            continue;
        }

        if !seen.insert(selection.mcp_server.as_str()) {
            tracing::warn!(server_name = %selection.mcp_server, "Duplicate MCP server selection");
            warnings.push(ResolutionWarning::DuplicateServerSelection {
                server: selection.mcp_server.clone(),
            });
            continue;
        }

        let Some(server) = resolve_server(catalog, selection, settings, &mut warnings).await?
        else {
            continue;
        };

        if server.tools.is_empty() {
            tracing::debug!(server_name = %server.name, "MCP server has no enabled tools; omitted");
            continue;
        }

        servers.push(server);
    }

    Ok(ResolvedConfig { servers, warnings })
}

async fn resolve_server<C>(
    catalog: &C,
    selection: &ServerSelection,
    settings: &ResolverSettings,
    warnings: &mut Vec<ResolutionWarning>,
) -> Result<Option<ResolvedServer>, CatalogError>
where
    C: McpCatalog + ?Sized,
{
    let Some(server) = catalog.find_server_by_name(&selection.mcp_server).await? else {
        tracing::warn!(server_name = %selection.mcp_server, "Selected MCP server not in catalog");
        warnings.push(ResolutionWarning::DanglingServer {
            server: selection.mcp_server.clone(),
        });
        return Ok(None);
    };

    if server.disabled {
        tracing::info!(server_name = %server.name, "Selected MCP server is disabled in catalog");
        warnings.push(ResolutionWarning::ServerDisabled {
            server: server.name.clone(),
        });
        return Ok(None);
    }

    let tools = resolve_tools(catalog, &server, &selection.selected_tools, warnings).await?;

    Ok(Some(ResolvedServer {
        args: effective_args(&server, selection, warnings),
        env: effective_env(&server, selection, warnings),
        startup_timeout_ms: effective_startup_timeout(&server, selection, settings, warnings),
        tools,
        name: server.name,
        transport: server.transport,
        command: server.command,
        url: server.url,
    }))
}

async fn resolve_tools<C>(
    catalog: &C,
    server: &McpServer,
    selections: &[ToolSelection],
    warnings: &mut Vec<ResolutionWarning>,
) -> Result<Vec<ResolvedTool>, CatalogError>
where
    C: McpCatalog + ?Sized,
{
    let mut tools: Vec<ResolvedTool> = Vec::new();

    for selection in selections.iter().filter(|t| t.enabled) {
        if tools.iter().any(|t| t.name == selection.mcp_tool) {
            warnings.push(ResolutionWarning::DuplicateToolSelection {
                server: server.name.clone(),
                tool: selection.mcp_tool.clone(),
            });
            continue;
        }

        let found = catalog
            .find_tool_by_name(server.id, &selection.mcp_tool)
            .await?;
        if found.is_none() {
            tracing::warn!(
                server_name = %server.name,
                tool_name = %selection.mcp_tool,
                "Selected MCP tool not provided by server"
            );
            warnings.push(ResolutionWarning::DanglingTool {
                server: server.name.clone(),
                tool: selection.mcp_tool.clone(),
            });
            continue;
        }

        tools.push(ResolvedTool {
            name: selection.mcp_tool.clone(),
            permissions: selection.permissions.clone(),
            custom_config: selection.custom_config.clone(),
        });
    }

    Ok(tools)
}

/// Convert a resolved config back into an equivalent selection list.
///
/// Every effective value is pinned as an explicit override, so resolving
/// the result against an unchanged catalog reproduces the same servers
/// and tools.
pub fn to_selections(config: &ResolvedConfig) -> Vec<ServerSelection> {
    config
        .servers
        .iter()
        .map(|server| ServerSelection {
            mcp_server: server.name.clone(),
            enabled: true,
            custom_args: (!server.args.is_empty()).then(|| Override::Value(server.args.clone())),
            custom_env: (!server.env.is_empty()).then(|| {
                Override::Value(
                    server
                        .env
                        .iter()
                        .map(|e| (e.key.clone(), e.value.clone()))
                        .collect(),
                )
            }),
            custom_startup_timeout_ms: Some(Override::Value(server.startup_timeout_ms)),
            selected_tools: server
                .tools
                .iter()
                .map(|tool| {
                    ToolSelection::new(tool.name.clone())
                        .with_permissions(tool.permissions.clone())
                        .with_custom_config(tool.custom_config.clone())
                })
                .collect(),
            metadata: serde_json::Map::new(),
        })
        .collect()
}
