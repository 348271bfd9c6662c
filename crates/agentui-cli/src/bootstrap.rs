//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Data root and `.env` overrides
//! - Database pool and repositories (via agentui-db)
//! - The MCP configuration service (via agentui-mcp)
//!
//! Command handlers receive the composed context and delegate to the service.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use agentui_core::ResolverSettings;
use agentui_core::paths::{DATA_DIR_ENV, database_path_in, resolve_data_root};
use agentui_db::{CoreFactory, setup_database};
use agentui_mcp::McpConfigService;

/// Name of the overrides file kept in the data root.
pub const ENV_FILE_NAME: &str = ".env";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Data root given on the command line (or via `AGENTUI_DATA_DIR`).
    pub data_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Resolve the data root without touching the filesystem.
    pub fn data_root(&self) -> Result<PathBuf> {
        let override_dir = self
            .data_dir
            .clone()
            .map(PathBuf::into_os_string)
            .or_else(|| std::env::var_os(DATA_DIR_ENV));
        Ok(resolve_data_root(override_dir)?)
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// MCP catalog, entity and resolution service.
    pub mcp: Arc<McpConfigService>,
    /// Resolved data root.
    pub data_root: PathBuf,
    /// Path of the `SQLite` database in use.
    pub database_path: PathBuf,
}

impl CliContext {
    /// Access the MCP configuration service.
    pub fn mcp(&self) -> &McpConfigService {
        &self.mcp
    }
}

/// Bootstrap the CLI with all dependencies wired up.
///
/// Creates the data root if needed, loads `<data root>/.env` (existing
/// process variables win), opens the database and builds the service.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let data_root = config.data_root()?;
    fs::create_dir_all(&data_root)
        .with_context(|| format!("Failed to create data directory {}", data_root.display()))?;

    let env_file = data_root.join(ENV_FILE_NAME);
    if env_file.exists() {
        dotenvy::from_path(&env_file)
            .with_context(|| format!("Failed to load {}", env_file.display()))?;
        tracing::debug!(path = %env_file.display(), "Loaded environment overrides");
    }

    let settings = ResolverSettings::from_env()?;

    let database_path = database_path_in(&data_root)?;
    let pool = setup_database(&database_path).await?;
    let repos = CoreFactory::build_repos(pool);

    tracing::debug!(
        data_root = %data_root.display(),
        default_startup_timeout_ms = settings.default_startup_timeout_ms,
        "CLI bootstrapped"
    );

    Ok(CliContext {
        mcp: Arc::new(McpConfigService::new(repos, settings)),
        data_root,
        database_path,
    })
}
