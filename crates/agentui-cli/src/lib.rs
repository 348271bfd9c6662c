//! Command-line adapter for agentui.
//!
//! Manages the MCP catalog, Agents and Skills, and prints or exports their
//! resolved MCP configuration. All infrastructure is wired in
//! [`bootstrap`]; handlers only talk to the `McpConfigService`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary entry point only
use tracing_subscriber as _;

pub mod bootstrap;
pub mod catalog_commands;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use catalog_commands::{ServerCommand, ToolCommand};
pub use commands::{Commands, EntityCommand};
pub use error::CliError;
pub use parser::Cli;
