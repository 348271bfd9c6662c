//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits are minimal and CRUD-focused for repositories
//! - Lookups report absence as `Ok(None)`; `Err` means the store itself failed

pub mod catalog;
pub mod entity_repository;

use std::sync::Arc;

pub use catalog::{CatalogError, McpCatalog, McpCatalogRepository};
pub use entity_repository::{EntityRepository, EntityRepositoryError};

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations.
#[derive(Clone)]
pub struct Repos {
    /// MCP server/tool catalog.
    pub catalog: Arc<dyn McpCatalogRepository>,
    /// Agents and Skills with their embedded selections.
    pub entities: Arc<dyn EntityRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        catalog: Arc<dyn McpCatalogRepository>,
        entities: Arc<dyn EntityRepository>,
    ) -> Self {
        Self { catalog, entities }
    }
}
