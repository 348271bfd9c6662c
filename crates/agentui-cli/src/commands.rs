//! CLI command definitions.
//!
//! This module defines all available CLI commands and their arguments.

use std::path::PathBuf;

use clap::Subcommand;

use agentui_core::EntityKind;

use crate::catalog_commands::{ServerCommand, ToolCommand};

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage catalog MCP servers
    Server {
        #[command(subcommand)]
        command: ServerCommand,
    },

    /// Manage the tools of catalog servers
    Tool {
        #[command(subcommand)]
        command: ToolCommand,
    },

    /// Manage Agents and Skills
    Entity {
        #[command(subcommand)]
        command: EntityCommand,
    },

    /// Print the effective MCP configuration of an Agent or Skill
    Resolve {
        /// Entity kind (agent or skill)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Entity name
        name: String,

        /// Print the resolved configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export an Agent or Skill as a markdown definition file
    Export {
        /// Entity kind (agent or skill)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Entity name
        name: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Import markdown definition files as Agents or Skills
    Import {
        /// Entity kind the files are imported as
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Definition files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show resolved data paths
    Paths,
}

/// Manage Agents and Skills.
#[derive(Subcommand, Debug)]
pub enum EntityCommand {
    /// List entities, optionally of one kind
    List {
        /// Only list this kind (agent or skill)
        #[arg(long, value_parser = parse_kind)]
        kind: Option<EntityKind>,
    },

    /// Show an entity and its stored selections
    Show {
        /// Entity kind (agent or skill)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Entity name
        name: String,
    },

    /// Create or replace an entity from a JSON file
    Apply {
        /// JSON document with kind, name, description, body and mcpSelections
        file: PathBuf,
    },

    /// Delete an entity
    Delete {
        /// Entity kind (agent or skill)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Entity name
        name: String,
    },
}

fn parse_kind(s: &str) -> Result<EntityKind, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_server_add() {
        let cli = Cli::parse_from([
            "agentui",
            "server",
            "add",
            "filesystem",
            "--command",
            "npx",
            "--arg",
            "-y",
            "--arg",
            "@modelcontextprotocol/server-filesystem",
            "--env",
            "ROOT=/srv",
            "--startup-timeout-ms",
            "5000",
        ]);

        let Commands::Server {
            command:
                ServerCommand::Add {
                    name,
                    transport,
                    command,
                    args,
                    env,
                    startup_timeout_ms,
                    disabled,
                    ..
                },
        } = cli.command
        else {
            panic!("expected server add");
        };

        assert_eq!(name, "filesystem");
        assert_eq!(transport, agentui_core::McpTransport::Stdio);
        assert_eq!(command.as_deref(), Some("npx"));
        assert_eq!(args, ["-y", "@modelcontextprotocol/server-filesystem"]);
        assert_eq!(env, [("ROOT".to_string(), "/srv".to_string())]);
        assert_eq!(startup_timeout_ms, Some(5000));
        assert!(!disabled);
    }

    #[test]
    fn test_parse_server_disable_and_tool_remove() {
        let cli = Cli::parse_from(["agentui", "server", "disable", "git"]);
        assert!(matches!(
            cli.command,
            Commands::Server {
                command: ServerCommand::Disable { ref name }
            } if name == "git"
        ));

        let cli = Cli::parse_from(["agentui", "server", "enable", "git"]);
        assert!(matches!(
            cli.command,
            Commands::Server {
                command: ServerCommand::Enable { .. }
            }
        ));

        let cli = Cli::parse_from(["agentui", "tool", "remove", "filesystem", "write_file"]);
        let Commands::Tool {
            command: ToolCommand::Remove { server, name },
        } = cli.command
        else {
            panic!("expected tool remove");
        };
        assert_eq!(server, "filesystem");
        assert_eq!(name, "write_file");
    }

    #[test]
    fn test_parse_resolve_accepts_plural_kind() {
        let cli = Cli::parse_from(["agentui", "resolve", "skills", "research", "--json"]);
        assert!(matches!(
            cli.command,
            Commands::Resolve {
                kind: EntityKind::Skill,
                json: true,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_import_requires_files() {
        assert!(Cli::try_parse_from(["agentui", "import", "skill"]).is_err());

        let cli = Cli::parse_from(["agentui", "import", "agent", "a.md", "b.md"]);
        let Commands::Import { kind, files } = cli.command else {
            panic!("expected import");
        };
        assert_eq!(kind, EntityKind::Agent);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["agentui", "entity", "show", "robot", "x"]).is_err());
    }
}
