//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and the mapping
//! from service errors to exit codes and user-facing messages.

use thiserror::Error;

use agentui_core::paths::PathError;
use agentui_core::{CatalogError, EntityRepositoryError, SettingsError};
use agentui_mcp::{McpConfigError, SelectionError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// General failure.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Input data was rejected (selections, definition files, JSON).
    #[error("Invalid data: {0}")]
    Data(String),

    /// A named server, tool or entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::Data(_) => 65,     // EX_DATAERR
            Self::NotFound(_) => 66, // EX_NOINPUT
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }

    /// Classify an error bubbled up from a handler.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<Self>() {
            Ok(cli) => return cli,
            Err(err) => err,
        };
        let err = match err.downcast::<McpConfigError>() {
            Ok(mcp) => return mcp.into(),
            Err(err) => err,
        };
        if let Some(path) = err.downcast_ref::<PathError>() {
            return Self::Config(path.to_string());
        }
        if let Some(settings) = err.downcast_ref::<SettingsError>() {
            return Self::Config(settings.to_string());
        }
        if err.downcast_ref::<std::io::Error>().is_some() {
            return Self::Io(format!("{err:#}"));
        }
        if err.downcast_ref::<serde_json::Error>().is_some() {
            return Self::Data(format!("{err:#}"));
        }
        Self::Core(format!("{err:#}"))
    }
}

impl From<McpConfigError> for CliError {
    fn from(err: McpConfigError) -> Self {
        let message = err.to_string();
        if err.is_not_found() {
            return Self::NotFound(message);
        }

        match err {
            McpConfigError::Catalog(CatalogError::Internal(_))
            | McpConfigError::Entity(EntityRepositoryError::Internal(_))
            | McpConfigError::Selection(SelectionError::Catalog(_)) => Self::Database(message),
            McpConfigError::Catalog(CatalogError::Conflict(_) | CatalogError::InUse { .. }) => {
                Self::Core(message)
            }
            McpConfigError::Invalid(_) => Self::Arguments(message),
            _ => Self::Data(message),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
