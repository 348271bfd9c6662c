//! `SQLite` implementation of the Agent/Skill repository.
//!
//! Selections are embedded value objects, so they are stored as a single
//! JSON document column and replaced wholesale on every save.

use async_trait::async_trait;
use sqlx::SqlitePool;

use agentui_core::{
    Entity, EntityKind, EntityRepository, EntityRepositoryError, NewEntity, ServerSelection,
};

use super::row_mappers::parse_datetime;

/// `SQLite` implementation of the entity repository.
pub struct SqliteEntityRepository {
    pool: SqlitePool,
}

impl SqliteEntityRepository {
    /// Create a new `SQLite` entity repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const ENTITY_COLUMNS: &str = "id, kind, name, description, body, mcp_selections, updated_at";

#[derive(sqlx::FromRow)]
struct EntityRow {
    id: i64,
    kind: String,
    name: String,
    description: String,
    body: String,
    mcp_selections: String,
    updated_at: String,
}

fn row_to_entity(row: EntityRow) -> Result<Entity, EntityRepositoryError> {
    let kind: EntityKind = row.kind.parse().map_err(EntityRepositoryError::Internal)?;
    let mcp_selections: Vec<ServerSelection> = serde_json::from_str(&row.mcp_selections)
        .map_err(|e| {
            EntityRepositoryError::Serialization(format!(
                "Invalid selections for {kind} '{}': {e}",
                row.name
            ))
        })?;

    Ok(Entity {
        id: row.id,
        kind,
        name: row.name,
        description: row.description,
        body: row.body,
        mcp_selections,
        updated_at: parse_datetime(&row.updated_at),
    })
}

fn internal(e: sqlx::Error) -> EntityRepositoryError {
    EntityRepositoryError::Internal(e.to_string())
}

#[async_trait]
impl EntityRepository for SqliteEntityRepository {
    async fn save(&self, entity: NewEntity) -> Result<Entity, EntityRepositoryError> {
        let selections_json = serde_json::to_string(&entity.mcp_selections)
            .map_err(|e| EntityRepositoryError::Serialization(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO entities (kind, name, description, body, mcp_selections, updated_at)
            VALUES (?, ?, ?, ?, ?, datetime('now'))
            ON CONFLICT(kind, name) DO UPDATE SET
                description = excluded.description,
                body = excluded.body,
                mcp_selections = excluded.mcp_selections,
                updated_at = excluded.updated_at
            ",
        )
        .bind(entity.kind.as_str())
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(&entity.body)
        .bind(&selections_json)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        tracing::debug!(kind = %entity.kind, name = %entity.name, "Saved entity row");
        self.get_by_name(entity.kind, &entity.name).await
    }

    async fn get_by_name(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Entity, EntityRepositoryError> {
        let row = sqlx::query_as::<_, EntityRow>(&format!(
            "SELECT {ENTITY_COLUMNS} FROM entities WHERE kind = ? AND name = ?"
        ))
        .bind(kind.as_str())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?
        .ok_or_else(|| EntityRepositoryError::NotFound {
            kind,
            name: name.to_string(),
        })?;

        row_to_entity(row)
    }

    async fn list(&self, kind: Option<EntityKind>) -> Result<Vec<Entity>, EntityRepositoryError> {
        let rows = match kind {
            Some(kind) => {
                sqlx::query_as::<_, EntityRow>(&format!(
                    "SELECT {ENTITY_COLUMNS} FROM entities WHERE kind = ? ORDER BY name"
                ))
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, EntityRow>(&format!(
                    "SELECT {ENTITY_COLUMNS} FROM entities ORDER BY kind, name"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(internal)?;

        rows.into_iter().map(row_to_entity).collect()
    }

    async fn delete(&self, kind: EntityKind, name: &str) -> Result<(), EntityRepositoryError> {
        let result = sqlx::query("DELETE FROM entities WHERE kind = ? AND name = ?")
            .bind(kind.as_str())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        if result.rows_affected() == 0 {
            return Err(EntityRepositoryError::NotFound {
                kind,
                name: name.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use agentui_core::{Override, ToolSelection};
    use serde_json::json;

    async fn repo() -> (SqlitePool, SqliteEntityRepository) {
        let pool = setup_test_database().await.unwrap();
        (pool.clone(), SqliteEntityRepository::new(pool))
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let (_, repo) = repo().await;

        let saved = repo
            .save(
                NewEntity::new(EntityKind::Skill, "research")
                    .with_description("Browse the web")
                    .with_body("# Research\n")
                    .with_selection(
                        ServerSelection::new("filesystem")
                            .with_env("ROOT", "/srv")
                            .with_tool_selection(
                                ToolSelection::new("read_file")
                                    .with_permissions(json!({ "maxBytes": 1024 })),
                            ),
                    ),
            )
            .await
            .unwrap();

        let fetched = repo.get_by_name(EntityKind::Skill, "research").await.unwrap();
        assert_eq!(fetched.id, saved.id);
        assert_eq!(fetched.description, "Browse the web");
        assert_eq!(fetched.mcp_selections, saved.mcp_selections);
        assert_eq!(
            fetched.mcp_selections[0].selected_tools[0].permissions["maxBytes"],
            1024
        );
    }

    #[tokio::test]
    async fn test_save_replaces_by_kind_and_name() {
        let (_, repo) = repo().await;

        let first = repo
            .save(NewEntity::new(EntityKind::Agent, "writer"))
            .await
            .unwrap();
        let second = repo
            .save(
                NewEntity::new(EntityKind::Agent, "writer")
                    .with_selection(ServerSelection::new("git").with_tool("commit")),
            )
            .await
            .unwrap();
        repo.save(NewEntity::new(EntityKind::Skill, "writer"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.mcp_selections.len(), 1);
        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some(EntityKind::Skill)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_override_survives_storage() {
        let (pool, repo) = repo().await;

        sqlx::query(
            "INSERT INTO entities (kind, name, mcp_selections) VALUES ('agent', 'legacy', ?)",
        )
        .bind(r#"[{"mcpServer":"git","customArgs":"--verbose","tools":[{"mcpTool":"commit"}]}]"#)
        .execute(&pool)
        .await
        .unwrap();

        let entity = repo.get_by_name(EntityKind::Agent, "legacy").await.unwrap();
        let selection = &entity.mcp_selections[0];

        assert!(matches!(selection.custom_args, Some(Override::Malformed(_))));
        assert_eq!(selection.selected_tools.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let (_, repo) = repo().await;
        repo.save(NewEntity::new(EntityKind::Skill, "gone"))
            .await
            .unwrap();

        repo.delete(EntityKind::Skill, "gone").await.unwrap();

        assert!(matches!(
            repo.get_by_name(EntityKind::Skill, "gone").await,
            Err(EntityRepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(EntityKind::Skill, "gone").await,
            Err(EntityRepositoryError::NotFound { .. })
        ));
    }
}
