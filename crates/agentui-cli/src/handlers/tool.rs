//! Catalog tool command handlers.

use anyhow::Result;

use agentui_core::NewMcpTool;

use crate::bootstrap::CliContext;
use crate::catalog_commands::ToolCommand;
use crate::presentation::{print_separator, truncate_string};

/// Execute a `tool` subcommand.
pub async fn execute(ctx: &CliContext, command: ToolCommand) -> Result<()> {
    match command {
        ToolCommand::Add {
            server,
            name,
            description,
            input_schema,
        } => {
            let mut tool = NewMcpTool::new(name).with_description(description);
            if let Some(schema) = input_schema {
                tool = tool.with_input_schema(schema);
            }
            let created = ctx.mcp().add_tool(&server, tool).await?;
            println!("Added tool '{}' to MCP server '{server}'", created.name);
        }
        ToolCommand::List { server } => {
            let tools = ctx.mcp().list_tools(&server).await?;
            if tools.is_empty() {
                println!("MCP server '{server}' has no registered tools.");
                return Ok(());
            }

            println!("{:<30} Description", "Tool");
            print_separator(80);
            for tool in tools {
                println!(
                    "{:<30} {}",
                    truncate_string(&tool.name, 29),
                    truncate_string(&tool.description, 49)
                );
            }
        }
        ToolCommand::Remove { server, name } => {
            ctx.mcp().remove_tool(&server, &name).await?;
            println!("Removed tool '{name}' from MCP server '{server}'");
        }
    }
    Ok(())
}
