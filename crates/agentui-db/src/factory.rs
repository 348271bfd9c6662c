//! Composition utilities for building `Repos` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use agentui_core::Repos;

use crate::repositories::{SqliteCatalogRepository, SqliteEntityRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteCatalogRepository::new(pool.clone())),
            Arc::new(SqliteEntityRepository::new(pool)),
        )
    }

    /// Create a catalog repository from a pool.
    pub fn catalog_repository(pool: SqlitePool) -> Arc<SqliteCatalogRepository> {
        Arc::new(SqliteCatalogRepository::new(pool))
    }

    /// Create an entity repository from a pool.
    pub fn entity_repository(pool: SqlitePool) -> Arc<SqliteEntityRepository> {
        Arc::new(SqliteEntityRepository::new(pool))
    }
}
