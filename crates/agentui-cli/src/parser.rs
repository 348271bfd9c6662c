//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use agentui_core::paths::DATA_DIR_ENV;

use crate::commands::Commands;

/// Command-line interface for managing MCP selections of Agents and Skills.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "agentui")]
#[command(about = "Manage the MCP catalog and the MCP selections of Agents and Skills")]
#[command(version)]
pub struct Cli {
    /// Override the data directory for this invocation
    #[arg(long = "data-dir", global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_commands::ServerCommand;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "agentui",
            "--verbose",
            "--data-dir",
            "/tmp/agentui",
            "server",
            "list",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/agentui")));
        assert!(matches!(
            cli.command,
            Commands::Server {
                command: ServerCommand::List
            }
        ));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["agentui", "paths", "--data-dir", "/srv/agentui", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/agentui")));
    }
}
