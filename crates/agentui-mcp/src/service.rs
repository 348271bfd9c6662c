//! High-level service for MCP catalog and selection management.
//!
//! This is the API used by the CLI. It owns the write-time validation and
//! wires the resolver and the frontmatter codec to the repositories.

use agentui_core::{
    CatalogError, Entity, EntityKind, McpServer, McpTool, NewEntity, NewMcpServer, NewMcpTool,
    Repos, ResolutionWarning, ResolvedConfig, ResolverSettings,
};

use crate::error::McpConfigError;
use crate::frontmatter::{SkillDocument, format_resolved, parse_mcp_tools};
use crate::resolver::resolve;
use crate::validation::validate_selections;

/// An entity rendered as a definition file.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// Full markdown text with frontmatter.
    pub content: String,
    /// Warnings from resolving the entity's selections.
    pub warnings: Vec<ResolutionWarning>,
}

/// Result of importing one document.
#[derive(Debug)]
pub enum ImportStatus {
    /// The document was saved, possibly with some names skipped.
    Imported {
        entity: Entity,
        warnings: Vec<ResolutionWarning>,
    },
    /// The document was rejected; nothing was saved for it.
    Failed { error: McpConfigError },
}

/// One document of a batch import.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Where the text came from (usually a file path).
    pub source: String,
    pub status: ImportStatus,
}

/// Per-document results of a batch import.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    /// Number of documents saved.
    pub fn imported_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ImportStatus::Imported { .. }))
            .count()
    }

    /// Number of documents rejected.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.imported_count()
    }

    /// Total warnings across saved documents.
    pub fn warning_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                ImportStatus::Imported { warnings, .. } => warnings.len(),
                ImportStatus::Failed { .. } => 0,
            })
            .sum()
    }
}

/// MCP configuration service over the catalog and entity repositories.
pub struct McpConfigService {
    repos: Repos,
    settings: ResolverSettings,
}

impl McpConfigService {
    /// Create a service with injected repositories.
    pub const fn new(repos: Repos, settings: ResolverSettings) -> Self {
        Self { repos, settings }
    }

    /// Resolver settings in effect.
    pub const fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    // ---- catalog -------------------------------------------------------

    /// Add a server to the catalog.
    pub async fn add_server(&self, server: NewMcpServer) -> Result<McpServer, McpConfigError> {
        let server = self.repos.catalog.insert_server(server).await?;
        tracing::info!(server_id = server.id, server_name = %server.name, "Added MCP server");
        Ok(server)
    }

    /// Add a tool to a catalog server.
    pub async fn add_tool(
        &self,
        server_name: &str,
        tool: NewMcpTool,
    ) -> Result<McpTool, McpConfigError> {
        let server = self.server_by_name(server_name).await?;
        let tool = self.repos.catalog.insert_tool(server.id, tool).await?;
        tracing::info!(server_name = %server.name, tool_name = %tool.name, "Added MCP tool");
        Ok(tool)
    }

    /// All catalog servers, ordered by name.
    pub async fn list_servers(&self) -> Result<Vec<McpServer>, McpConfigError> {
        Ok(self.repos.catalog.list_servers().await?)
    }

    /// Tools of one catalog server, ordered by name.
    pub async fn list_tools(&self, server_name: &str) -> Result<Vec<McpTool>, McpConfigError> {
        let server = self.server_by_name(server_name).await?;
        Ok(self.repos.catalog.list_tools(server.id).await?)
    }

    /// Enable or disable a catalog server.
    ///
    /// Disabled servers stay selectable but are left out of every resolved
    /// configuration with a `ServerDisabled` warning.
    pub async fn set_server_disabled(
        &self,
        server_name: &str,
        disabled: bool,
    ) -> Result<McpServer, McpConfigError> {
        let server = self.server_by_name(server_name).await?;
        self.repos
            .catalog
            .set_server_disabled(server.id, disabled)
            .await?;
        tracing::info!(server_name = %server.name, disabled, "Updated MCP server status");
        Ok(McpServer { disabled, ..server })
    }

    /// Remove one tool from a catalog server.
    ///
    /// Selections that still name the tool resolve with a `DanglingTool`
    /// warning.
    pub async fn remove_tool(
        &self,
        server_name: &str,
        tool_name: &str,
    ) -> Result<(), McpConfigError> {
        let server = self.server_by_name(server_name).await?;
        let tool = self
            .repos
            .catalog
            .find_tool_by_name(server.id, tool_name)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("{server_name}/{tool_name}")))?;

        self.repos.catalog.delete_tool(tool.id).await?;
        tracing::info!(server_name = %server.name, tool_name = %tool.name, "Removed MCP tool");
        Ok(())
    }

    /// Remove a server and its tools.
    ///
    /// Refused while any Agent or Skill still selects the server.
    pub async fn remove_server(&self, server_name: &str) -> Result<(), McpConfigError> {
        let server = self.server_by_name(server_name).await?;

        let referenced_by: Vec<String> = self
            .repos
            .entities
            .list(None)
            .await?
            .iter()
            .filter(|e| e.references_server(&server.name))
            .map(|e| format!("{} {}", e.kind, e.name))
            .collect();

        if !referenced_by.is_empty() {
            return Err(CatalogError::InUse {
                server: server.name,
                referenced_by,
            }
            .into());
        }

        self.repos.catalog.delete_server(server.id).await?;
        tracing::info!(server_name = %server.name, "Removed MCP server");
        Ok(())
    }

    async fn server_by_name(&self, name: &str) -> Result<McpServer, McpConfigError> {
        self.repos
            .catalog
            .find_server_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::NotFound(name.to_string()).into())
    }

    // ---- entities ------------------------------------------------------

    /// Validate and save an Agent or Skill, replacing any with the same name.
    pub async fn save_entity(&self, entity: NewEntity) -> Result<Entity, McpConfigError> {
        if entity.name.trim().is_empty() {
            return Err(McpConfigError::Invalid(format!(
                "{} name cannot be empty",
                entity.kind
            )));
        }

        validate_selections(&*self.repos.catalog, &entity.mcp_selections).await?;

        let saved = self.repos.entities.save(entity).await?;
        tracing::info!(
            kind = %saved.kind,
            name = %saved.name,
            selections = saved.mcp_selections.len(),
            "Saved entity"
        );
        Ok(saved)
    }

    /// Fetch an Agent or Skill by name.
    pub async fn get_entity(&self, kind: EntityKind, name: &str) -> Result<Entity, McpConfigError> {
        Ok(self.repos.entities.get_by_name(kind, name).await?)
    }

    /// List entities, optionally of one kind.
    pub async fn list_entities(
        &self,
        kind: Option<EntityKind>,
    ) -> Result<Vec<Entity>, McpConfigError> {
        Ok(self.repos.entities.list(kind).await?)
    }

    /// Delete an Agent or Skill together with its selections.
    pub async fn delete_entity(&self, kind: EntityKind, name: &str) -> Result<(), McpConfigError> {
        self.repos.entities.delete(kind, name).await?;
        tracing::info!(kind = %kind, name = %name, "Deleted entity");
        Ok(())
    }

    // ---- resolution and export ----------------------------------------

    /// Effective MCP configuration of an Agent or Skill.
    pub async fn resolve_entity(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<ResolvedConfig, McpConfigError> {
        let entity = self.get_entity(kind, name).await?;
        let config = resolve(&*self.repos.catalog, &entity.mcp_selections, &self.settings).await?;

        tracing::debug!(
            kind = %kind,
            name = %name,
            servers = config.servers.len(),
            warnings = config.warnings.len(),
            "Resolved MCP configuration"
        );
        Ok(config)
    }

    /// Render an Agent or Skill as a definition file.
    ///
    /// The `mcp_tools` block lists the effective tools after resolution.
    pub async fn export_entity(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<ExportedDocument, McpConfigError> {
        let entity = self.get_entity(kind, name).await?;
        let config = resolve(&*self.repos.catalog, &entity.mcp_selections, &self.settings).await?;

        let mut document = SkillDocument::new(entity.name);
        document.description = entity.description;
        document.mcp_tools = format_resolved(&config);
        document.body = entity.body;

        Ok(ExportedDocument {
            content: document.render()?,
            warnings: config.warnings,
        })
    }

    // ---- import ----------------------------------------------------------

    /// Import a batch of definition files as entities of `kind`.
    ///
    /// Each document is parsed and saved on its own; a rejected document
    /// is recorded in the report and the rest of the batch continues.
    pub async fn import_documents<I, S, T>(&self, kind: EntityKind, documents: I) -> ImportReport
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let mut report = ImportReport::default();

        for (source, text) in documents {
            let source = source.into();
            let status = match self.import_document(kind, text.as_ref()).await {
                Ok((entity, warnings)) => {
                    tracing::info!(
                        source = %source,
                        name = %entity.name,
                        warnings = warnings.len(),
                        "Imported definition"
                    );
                    ImportStatus::Imported { entity, warnings }
                }
                Err(error) => {
                    tracing::warn!(source = %source, error = %error, "Failed to import definition");
                    ImportStatus::Failed { error }
                }
            };
            report.outcomes.push(ImportOutcome { source, status });
        }

        report
    }

    async fn import_document(
        &self,
        kind: EntityKind,
        text: &str,
    ) -> Result<(Entity, Vec<ResolutionWarning>), McpConfigError> {
        let document = SkillDocument::parse(text)?;
        let parsed = parse_mcp_tools(&*self.repos.catalog, &document.mcp_tools).await?;

        let mut entity = NewEntity::new(kind, document.name)
            .with_description(document.description)
            .with_body(document.body);
        entity.mcp_selections = parsed.selections;

        let saved = self.save_entity(entity).await?;
        Ok((saved, parsed.warnings))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use agentui_core::ServerSelection;

    use crate::memory::{InMemoryCatalog, InMemoryEntityRepository};

    async fn service() -> McpConfigService {
        let repos = Repos::new(
            Arc::new(InMemoryCatalog::new()),
            Arc::new(InMemoryEntityRepository::new()),
        );
        let service = McpConfigService::new(repos, ResolverSettings::default());

        service
            .add_server(NewMcpServer::new_stdio("filesystem", "npx", vec![]))
            .await
            .unwrap();
        for tool in ["read_file", "write_file"] {
            service
                .add_tool("filesystem", NewMcpTool::new(tool))
                .await
                .unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_add_tool_to_unknown_server() {
        let service = service().await;
        let err = service
            .add_tool("browser", NewMcpTool::new("navigate"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_save_entity_validates() {
        let service = service().await;
        let entity = NewEntity::new(EntityKind::Agent, "writer")
            .with_selection(ServerSelection::new("filesystem").with_tool("chmod"));

        let err = service.save_entity(entity).await.unwrap_err();
        assert!(matches!(err, McpConfigError::Selection(_)));
        assert!(service.list_entities(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_server_drops_out_of_resolution() {
        let service = service().await;
        service
            .save_entity(
                NewEntity::new(EntityKind::Agent, "reader")
                    .with_selection(ServerSelection::new("filesystem").with_tool("read_file")),
            )
            .await
            .unwrap();

        let server = service.set_server_disabled("filesystem", true).await.unwrap();
        assert!(server.disabled);

        let config = service
            .resolve_entity(EntityKind::Agent, "reader")
            .await
            .unwrap();
        assert!(config.is_empty());
        assert_eq!(
            config.warnings,
            vec![ResolutionWarning::ServerDisabled {
                server: "filesystem".to_string()
            }]
        );

        service.set_server_disabled("filesystem", false).await.unwrap();
        let config = service
            .resolve_entity(EntityKind::Agent, "reader")
            .await
            .unwrap();
        assert_eq!(config.servers.len(), 1);
        assert!(!service.list_servers().await.unwrap()[0].disabled);
    }

    #[tokio::test]
    async fn test_set_server_disabled_unknown_server() {
        let service = service().await;
        let err = service.set_server_disabled("browser", true).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_tool_leaves_dangling_selection() {
        let service = service().await;
        service
            .save_entity(
                NewEntity::new(EntityKind::Skill, "editor").with_selection(
                    ServerSelection::new("filesystem")
                        .with_tool("read_file")
                        .with_tool("write_file"),
                ),
            )
            .await
            .unwrap();

        service.remove_tool("filesystem", "write_file").await.unwrap();

        let tools = service.list_tools("filesystem").await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "read_file");

        let config = service
            .resolve_entity(EntityKind::Skill, "editor")
            .await
            .unwrap();
        assert_eq!(
            config.enabled_pairs(),
            vec![("filesystem".to_string(), "read_file".to_string())]
        );
        assert!(config.warnings.contains(&ResolutionWarning::DanglingTool {
            server: "filesystem".to_string(),
            tool: "write_file".to_string(),
        }));

        let err = service
            .remove_tool("filesystem", "write_file")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_server_in_use() {
        let service = service().await;
        service
            .save_entity(
                NewEntity::new(EntityKind::Skill, "notes")
                    .with_selection(ServerSelection::new("filesystem").with_tool("read_file")),
            )
            .await
            .unwrap();

        let err = service.remove_server("filesystem").await.unwrap_err();
        assert!(matches!(
            err,
            McpConfigError::Catalog(CatalogError::InUse { ref referenced_by, .. })
                if referenced_by == &vec!["skill notes".to_string()]
        ));

        service.delete_entity(EntityKind::Skill, "notes").await.unwrap();
        service.remove_server("filesystem").await.unwrap();
        assert!(service.list_servers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_lists_effective_tools() {
        let service = service().await;
        service
            .save_entity(
                NewEntity::new(EntityKind::Skill, "notes")
                    .with_description("Take notes")
                    .with_body("# Notes\n")
                    .with_selection(ServerSelection::new("filesystem").with_tool("read_file")),
            )
            .await
            .unwrap();

        let exported = service.export_entity(EntityKind::Skill, "notes").await.unwrap();
        let document = SkillDocument::parse(&exported.content).unwrap();

        assert_eq!(document.name, "notes");
        assert_eq!(document.description, "Take notes");
        assert_eq!(
            document.mcp_tools.get("filesystem").unwrap(),
            &vec!["read_file".to_string()]
        );
        assert!(exported.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_import_batch_continues_past_failures() {
        let service = service().await;
        let documents = vec![
            (
                "good.md",
                "---\nname: good\nmcp_tools:\n  filesystem: [read_file, chmod]\n---\nbody\n",
            ),
            ("bad.md", "no frontmatter at all\n"),
            ("also-good.md", "---\nname: also-good\n---\nbody\n"),
        ];

        let report = service.import_documents(EntityKind::Skill, documents).await;

        assert_eq!(report.imported_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(matches!(
            report.outcomes[1].status,
            ImportStatus::Failed {
                error: McpConfigError::Frontmatter(_)
            }
        ));

        let good = service.get_entity(EntityKind::Skill, "good").await.unwrap();
        assert_eq!(good.mcp_selections[0].selected_tools.len(), 1);
    }
}
