//! Errors surfaced by the MCP configuration service.

use thiserror::Error;

use agentui_core::{CatalogError, EntityRepositoryError};

use crate::frontmatter::FrontmatterError;
use crate::validation::SelectionError;

/// Any failure of an `McpConfigService` operation.
#[derive(Debug, Error)]
pub enum McpConfigError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Entity(#[from] EntityRepositoryError),

    #[error("Invalid selections: {0}")]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error("{0}")]
    Invalid(String),
}

impl McpConfigError {
    /// Whether the error means a named server, tool or entity does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Catalog(CatalogError::NotFound(_)) | Self::Entity(EntityRepositoryError::NotFound { .. })
        )
    }
}
