//! In-memory implementations of the catalog and entity repositories.
//!
//! Used by tests and by embedders that load the catalog from somewhere
//! other than the `SQLite` store.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use agentui_core::{
    CatalogError, Entity, EntityKind, EntityRepository, EntityRepositoryError, McpCatalog,
    McpCatalogRepository, McpServer, McpTool, NewEntity, NewMcpServer, NewMcpTool,
};

#[derive(Default)]
struct CatalogState {
    next_id: i64,
    servers: Vec<McpServer>,
    tools: Vec<McpTool>,
}

impl CatalogState {
    const fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Catalog held entirely in memory.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, CatalogState>, CatalogError> {
        self.state
            .read()
            .map_err(|_| CatalogError::Internal("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, CatalogState>, CatalogError> {
        self.state
            .write()
            .map_err(|_| CatalogError::Internal("catalog lock poisoned".to_string()))
    }
}

#[async_trait]
impl McpCatalog for InMemoryCatalog {
    async fn find_server_by_name(&self, name: &str) -> Result<Option<McpServer>, CatalogError> {
        Ok(self.read()?.servers.iter().find(|s| s.name == name).cloned())
    }

    async fn find_tool_by_name(
        &self,
        server_id: i64,
        name: &str,
    ) -> Result<Option<McpTool>, CatalogError> {
        Ok(self
            .read()?
            .tools
            .iter()
            .find(|t| t.server_id == server_id && t.name == name)
            .cloned())
    }
}

#[async_trait]
impl McpCatalogRepository for InMemoryCatalog {
    async fn insert_server(&self, server: NewMcpServer) -> Result<McpServer, CatalogError> {
        server.validate().map_err(CatalogError::Invalid)?;

        let mut state = self.write()?;
        if state.servers.iter().any(|s| s.name == server.name) {
            return Err(CatalogError::Conflict(server.name));
        }

        let stored = McpServer {
            id: state.allocate_id(),
            name: server.name,
            transport: server.transport,
            command: server.command,
            args: server.args,
            env: server.env,
            url: server.url,
            disabled: server.disabled,
            startup_timeout_ms: server.startup_timeout_ms,
            created_at: Utc::now(),
        };
        state.servers.push(stored.clone());
        Ok(stored)
    }

    async fn get_server(&self, id: i64) -> Result<McpServer, CatalogError> {
        self.read()?
            .servers
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn list_servers(&self) -> Result<Vec<McpServer>, CatalogError> {
        let mut servers = self.read()?.servers.clone();
        servers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(servers)
    }

    async fn set_server_disabled(&self, id: i64, disabled: bool) -> Result<(), CatalogError> {
        let mut state = self.write()?;
        let server = state
            .servers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        server.disabled = disabled;
        Ok(())
    }

    async fn delete_server(&self, id: i64) -> Result<(), CatalogError> {
        let mut state = self.write()?;
        let before = state.servers.len();
        state.servers.retain(|s| s.id != id);
        if state.servers.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        state.tools.retain(|t| t.server_id != id);
        Ok(())
    }

    async fn insert_tool(&self, server_id: i64, tool: NewMcpTool) -> Result<McpTool, CatalogError> {
        if tool.name.trim().is_empty() {
            return Err(CatalogError::Invalid("MCP tool name cannot be empty".to_string()));
        }

        let mut state = self.write()?;
        if !state.servers.iter().any(|s| s.id == server_id) {
            return Err(CatalogError::NotFound(server_id.to_string()));
        }
        if state
            .tools
            .iter()
            .any(|t| t.server_id == server_id && t.name == tool.name)
        {
            return Err(CatalogError::Conflict(tool.name));
        }

        let stored = McpTool {
            id: state.allocate_id(),
            server_id,
            name: tool.name,
            description: tool.description,
            input_schema: tool.input_schema,
        };
        state.tools.push(stored.clone());
        Ok(stored)
    }

    async fn list_tools(&self, server_id: i64) -> Result<Vec<McpTool>, CatalogError> {
        let mut tools: Vec<McpTool> = self
            .read()?
            .tools
            .iter()
            .filter(|t| t.server_id == server_id)
            .cloned()
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tools)
    }

    async fn delete_tool(&self, tool_id: i64) -> Result<(), CatalogError> {
        let mut state = self.write()?;
        let before = state.tools.len();
        state.tools.retain(|t| t.id != tool_id);
        if state.tools.len() == before {
            return Err(CatalogError::NotFound(tool_id.to_string()));
        }
        Ok(())
    }
}

/// Agents and Skills held entirely in memory.
#[derive(Default)]
pub struct InMemoryEntityRepository {
    entities: RwLock<Vec<Entity>>,
}

impl InMemoryEntityRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> EntityRepositoryError {
    EntityRepositoryError::Internal("entity lock poisoned".to_string())
}

#[async_trait]
impl EntityRepository for InMemoryEntityRepository {
    async fn save(&self, entity: NewEntity) -> Result<Entity, EntityRepositoryError> {
        let mut entities = self.entities.write().map_err(|_| poisoned())?;
        let next_id = entities.iter().map(|e| e.id).max().unwrap_or(0) + 1;

        let existing = entities
            .iter_mut()
            .find(|e| e.kind == entity.kind && e.name == entity.name);

        let saved = match existing {
            Some(current) => {
                current.description = entity.description;
                current.body = entity.body;
                current.mcp_selections = entity.mcp_selections;
                current.updated_at = Utc::now();
                current.clone()
            }
            None => {
                let created = Entity {
                    id: next_id,
                    kind: entity.kind,
                    name: entity.name,
                    description: entity.description,
                    body: entity.body,
                    mcp_selections: entity.mcp_selections,
                    updated_at: Utc::now(),
                };
                entities.push(created.clone());
                created
            }
        };

        Ok(saved)
    }

    async fn get_by_name(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Entity, EntityRepositoryError> {
        self.entities
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|e| e.kind == kind && e.name == name)
            .cloned()
            .ok_or_else(|| EntityRepositoryError::NotFound {
                kind,
                name: name.to_string(),
            })
    }

    async fn list(&self, kind: Option<EntityKind>) -> Result<Vec<Entity>, EntityRepositoryError> {
        let mut entities: Vec<Entity> = self
            .entities
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .cloned()
            .collect();
        entities.sort_by(|a, b| {
            a.kind
                .as_str()
                .cmp(b.kind.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(entities)
    }

    async fn delete(&self, kind: EntityKind, name: &str) -> Result<(), EntityRepositoryError> {
        let mut entities = self.entities.write().map_err(|_| poisoned())?;
        let before = entities.len();
        entities.retain(|e| !(e.kind == kind && e.name == name));
        if entities.len() == before {
            return Err(EntityRepositoryError::NotFound {
                kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
