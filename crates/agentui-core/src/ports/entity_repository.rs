//! Agent/Skill repository trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entity::{Entity, EntityKind, NewEntity};

/// Errors for entity repository operations.
#[derive(Debug, Error)]
pub enum EntityRepositoryError {
    /// No entity with the given kind and name.
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    /// The embedded selection document could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage backend error (database, etc.).
    #[error("Storage error: {0}")]
    Internal(String),
}

/// Repository trait for Agent and Skill persistence.
///
/// Selections are embedded in the entity record and are replaced wholesale
/// on every save; they have no independent storage identity.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Insert the entity, or replace the existing one with the same kind and name.
    async fn save(&self, entity: NewEntity) -> Result<Entity, EntityRepositoryError>;

    /// Get an entity by kind and name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such entity exists
    async fn get_by_name(&self, kind: EntityKind, name: &str)
    -> Result<Entity, EntityRepositoryError>;

    /// List entities ordered by kind then name, optionally filtered by kind.
    async fn list(&self, kind: Option<EntityKind>) -> Result<Vec<Entity>, EntityRepositoryError>;

    /// Delete an entity (and, with it, its selections).
    async fn delete(&self, kind: EntityKind, name: &str) -> Result<(), EntityRepositoryError>;
}
