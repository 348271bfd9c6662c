//! `SQLite` storage for the agentui MCP catalog and its Agents/Skills.
//!
//! Implements the `agentui-core` repository ports with `sqlx`. Nothing
//! outside this crate sees a `SqlitePool`: adapters call
//! [`setup_database`] and then [`CoreFactory::build_repos`].

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export repository implementations
pub use repositories::{SqliteCatalogRepository, SqliteEntityRepository};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
