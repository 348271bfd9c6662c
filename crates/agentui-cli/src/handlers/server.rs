//! Catalog server command handlers.

use anyhow::Result;

use agentui_core::{McpEnvEntry, NewMcpServer};

use crate::bootstrap::CliContext;
use crate::catalog_commands::ServerCommand;
use crate::presentation::{format_optional, print_separator, truncate_string};

/// Execute a `server` subcommand.
pub async fn execute(ctx: &CliContext, command: ServerCommand) -> Result<()> {
    match command {
        ServerCommand::Add {
            name,
            transport,
            command,
            args,
            env,
            url,
            startup_timeout_ms,
            disabled,
        } => {
            let server = NewMcpServer {
                name,
                transport,
                command,
                args,
                env: env
                    .into_iter()
                    .map(|(key, value)| McpEnvEntry::new(key, value))
                    .collect(),
                url,
                disabled,
                startup_timeout_ms,
            };
            let created = ctx.mcp().add_server(server).await?;
            println!(
                "Added MCP server '{}' ({}, id {})",
                created.name, created.transport, created.id
            );
        }
        ServerCommand::List => list(ctx).await?,
        ServerCommand::Enable { name } => {
            ctx.mcp().set_server_disabled(&name, false).await?;
            println!("Enabled MCP server '{name}'");
        }
        ServerCommand::Disable { name } => {
            ctx.mcp().set_server_disabled(&name, true).await?;
            println!("Disabled MCP server '{name}'");
        }
        ServerCommand::Remove { name } => {
            ctx.mcp().remove_server(&name).await?;
            println!("Removed MCP server '{name}'");
        }
    }
    Ok(())
}

async fn list(ctx: &CliContext) -> Result<()> {
    let servers = ctx.mcp().list_servers().await?;

    if servers.is_empty() {
        println!("No MCP servers in the catalog.");
        println!("Use 'agentui server add <name> --command <cmd>' to add one.");
        return Ok(());
    }

    println!(
        "{:<20} {:<6} {:<9} {:<9} Command / URL",
        "Name", "Type", "Timeout", "Status"
    );
    print_separator(80);

    for server in servers {
        let target = if server.transport.is_remote() {
            server.url.clone().unwrap_or_default()
        } else {
            let mut line = server.command.clone().unwrap_or_default();
            for arg in &server.args {
                line.push(' ');
                line.push_str(arg);
            }
            line
        };

        println!(
            "{:<20} {:<6} {:<9} {:<9} {}",
            truncate_string(&server.name, 19),
            server.transport,
            format_optional(server.startup_timeout_ms.as_ref(), "default"),
            if server.disabled { "disabled" } else { "enabled" },
            truncate_string(&target, 40)
        );
    }

    Ok(())
}
