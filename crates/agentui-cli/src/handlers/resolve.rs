//! Resolve command handler.
//!
//! Prints the effective MCP configuration an Agent or Skill would launch with.

use anyhow::Result;

use agentui_core::{EntityKind, ResolvedConfig};

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, print_warnings};

/// Execute the resolve command.
///
/// Warnings go to stderr so `--json` output stays machine-readable.
pub async fn execute(ctx: &CliContext, kind: EntityKind, name: &str, json: bool) -> Result<()> {
    let config = ctx.mcp().resolve_entity(kind, name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_config(kind, name, &config);
    }

    print_warnings(&config.warnings);
    Ok(())
}

fn print_config(kind: EntityKind, name: &str, config: &ResolvedConfig) {
    if config.is_empty() {
        println!("{kind} '{name}' has no effective MCP servers.");
        return;
    }

    for server in &config.servers {
        println!("{} ({})", server.name, server.transport);
        print_separator(60);
        if let Some(command) = &server.command {
            println!("  command: {command}");
        }
        if let Some(url) = &server.url {
            println!("  url:     {url}");
        }
        if !server.args.is_empty() {
            println!("  args:    {}", server.args.join(" "));
        }
        for entry in &server.env {
            println!("  env:     {}={}", entry.key, entry.value);
        }
        println!("  timeout: {} ms", server.startup_timeout_ms);
        let tools: Vec<&str> = server.tool_names().collect();
        println!("  tools:   {}", tools.join(", "));
        println!();
    }
}
