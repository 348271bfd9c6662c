//! Agent and Skill command handlers.

use std::path::Path;

use anyhow::{Context, Result};

use agentui_core::{Entity, NewEntity};

use crate::bootstrap::CliContext;
use crate::commands::EntityCommand;
use crate::error::CliError;
use crate::presentation::{print_separator, truncate_string};

/// Execute an `entity` subcommand.
pub async fn execute(ctx: &CliContext, command: EntityCommand) -> Result<()> {
    match command {
        EntityCommand::List { kind } => {
            let entities = ctx.mcp().list_entities(kind).await?;
            if entities.is_empty() {
                println!("No Agents or Skills found.");
                return Ok(());
            }

            println!(
                "{:<6} {:<24} {:<8} {:<20} Description",
                "Kind", "Name", "Servers", "Updated"
            );
            print_separator(90);
            for entity in entities {
                println!(
                    "{:<6} {:<24} {:<8} {:<20} {}",
                    entity.kind,
                    truncate_string(&entity.name, 23),
                    entity.mcp_selections.len(),
                    entity.updated_at.format("%Y-%m-%d %H:%M:%S"),
                    truncate_string(&entity.description, 30)
                );
            }
        }
        EntityCommand::Show { kind, name } => {
            let entity = ctx.mcp().get_entity(kind, &name).await?;
            show(&entity)?;
        }
        EntityCommand::Apply { file } => {
            let entity = read_entity(&file).await?;
            let saved = ctx.mcp().save_entity(entity).await?;
            println!(
                "Saved {} '{}' with {} MCP server selection(s)",
                saved.kind,
                saved.name,
                saved.mcp_selections.len()
            );
        }
        EntityCommand::Delete { kind, name } => {
            ctx.mcp().delete_entity(kind, &name).await?;
            println!("Deleted {kind} '{name}'");
        }
    }
    Ok(())
}

fn show(entity: &Entity) -> Result<()> {
    println!("Kind:        {}", entity.kind);
    println!("Name:        {}", entity.name);
    println!("Description: {}", entity.description);
    println!("Updated:     {}", entity.updated_at.format("%Y-%m-%d %H:%M:%S"));
    println!();
    println!("MCP selections:");
    println!("{}", serde_json::to_string_pretty(&entity.mcp_selections)?);
    Ok(())
}

/// Read a JSON entity document from disk.
pub async fn read_entity(path: &Path) -> Result<NewEntity> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_entity(&text).map_err(|e| CliError::Data(format!("{}: {e}", path.display())).into())
}

fn parse_entity(text: &str) -> Result<NewEntity, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentui_core::{EntityKind, Override};

    #[test]
    fn test_parse_entity_document() {
        let entity = parse_entity(
            r#"{
                "kind": "skill",
                "name": "research",
                "description": "Browse the web",
                "mcpSelections": [
                    {
                        "mcpServer": "filesystem",
                        "customEnv": { "ROOT": "/data" },
                        "selectedTools": [{ "mcpTool": "read_file" }]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(entity.kind, EntityKind::Skill);
        assert_eq!(entity.name, "research");
        assert!(entity.body.is_empty());
        let selection = &entity.mcp_selections[0];
        assert!(selection.enabled);
        assert!(matches!(selection.custom_env, Some(Override::Value(_))));
        assert_eq!(selection.selected_tools[0].mcp_tool, "read_file");
    }

    #[test]
    fn test_parse_entity_rejects_unknown_kind() {
        assert!(parse_entity(r#"{"kind":"robot","name":"x"}"#).is_err());
    }

    #[tokio::test]
    async fn test_read_entity_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_entity(&path).await.unwrap_err();
        let cli = CliError::from_anyhow(err);
        assert!(matches!(cli, CliError::Data(ref msg) if msg.contains("broken.json")));
    }
}
