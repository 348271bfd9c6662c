//! Core domain types and port definitions for agentui.
//!
//! This crate holds everything the MCP configuration logic needs to talk
//! about: catalog servers and tools, per-entity selections, the resolved
//! runtime configuration, Agents/Skills, and the repository ports that
//! storage adapters implement. It contains no storage or process code.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Entity, EntityKind, McpEnvEntry, McpServer, McpTool, McpTransport, NewEntity, NewMcpServer,
    NewMcpTool, Override, OverrideField, ResolutionWarning, ResolvedConfig, ResolvedServer,
    ResolvedTool, ServerSelection, ToolSelection,
};
pub use ports::{
    CatalogError, EntityRepository, EntityRepositoryError, McpCatalog, McpCatalogRepository,
    Repos,
};
pub use settings::{
    DEFAULT_STARTUP_TIMEOUT_MS, MAX_STARTUP_TIMEOUT_MS, ResolverSettings, SettingsError,
};
