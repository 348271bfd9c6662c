//! `SQLite` implementation of the MCP catalog repository.
//!
//! Environment variables are stored in a separate table with base64
//! encoding (not encryption). Tools and env rows are removed with their
//! server through `ON DELETE CASCADE`.

use async_trait::async_trait;
use base64::Engine;
use sqlx::SqlitePool;

use agentui_core::{
    CatalogError, McpCatalog, McpCatalogRepository, McpEnvEntry, McpServer, McpTool,
    McpTransport, NewMcpServer, NewMcpTool,
};

use super::row_mappers::{is_unique_violation, parse_datetime};

/// `SQLite` implementation of the MCP catalog.
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    /// Create a new `SQLite` catalog repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal row types for database queries
// ─────────────────────────────────────────────────────────────────────────────

const SERVER_COLUMNS: &str =
    "id, name, transport, command, args, url, disabled, startup_timeout_ms, created_at";

#[derive(sqlx::FromRow)]
struct McpServerRow {
    id: i64,
    name: String,
    transport: String,
    command: Option<String>,
    args: String,
    url: Option<String>,
    disabled: bool,
    startup_timeout_ms: Option<i64>,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct EnvRow {
    key: String,
    value: String,
}

#[derive(sqlx::FromRow)]
struct McpToolRow {
    id: i64,
    server_id: i64,
    name: String,
    description: String,
    input_schema: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a `McpServerRow` (with env) to domain `McpServer`.
fn row_to_server(row: McpServerRow, env: Vec<McpEnvEntry>) -> Result<McpServer, CatalogError> {
    let transport: McpTransport = row.transport.parse().map_err(CatalogError::Internal)?;
    let args: Vec<String> = serde_json::from_str(&row.args)
        .map_err(|e| CatalogError::Internal(format!("Invalid args for '{}': {e}", row.name)))?;
    let startup_timeout_ms = row
        .startup_timeout_ms
        .map(u64::try_from)
        .transpose()
        .map_err(|e| CatalogError::Internal(format!("Invalid startup timeout: {e}")))?;

    Ok(McpServer {
        id: row.id,
        name: row.name,
        transport,
        command: row.command,
        args,
        env,
        url: row.url,
        disabled: row.disabled,
        startup_timeout_ms,
        created_at: parse_datetime(&row.created_at),
    })
}

fn row_to_tool(row: McpToolRow) -> McpTool {
    let input_schema = serde_json::from_str(&row.input_schema).unwrap_or_else(|e| {
        tracing::warn!(tool_name = %row.name, error = %e, "Unreadable tool input schema");
        serde_json::Value::Null
    });

    McpTool {
        id: row.id,
        server_id: row.server_id,
        name: row.name,
        description: row.description,
        input_schema,
    }
}

/// Decode a base64-encoded environment variable value.
fn decode_env_value(encoded: &str) -> Result<String, CatalogError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| CatalogError::Internal(format!("Failed to decode env var: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|e| CatalogError::Internal(format!("Invalid UTF-8 in env var: {e}")))
}

/// Encode an environment variable value to base64.
fn encode_env_value(value: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}

/// Map `SQLx` errors to `CatalogError`, reporting `name` on conflicts.
fn map_sqlx_error(e: &sqlx::Error, name: &str) -> CatalogError {
    if is_unique_violation(e) {
        return CatalogError::Conflict(name.to_string());
    }
    CatalogError::Internal(e.to_string())
}

fn internal(e: sqlx::Error) -> CatalogError {
    CatalogError::Internal(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl McpCatalog for SqliteCatalogRepository {
    async fn find_server_by_name(&self, name: &str) -> Result<Option<McpServer>, CatalogError> {
        let row = sqlx::query_as::<_, McpServerRow>(&format!(
            "SELECT {SERVER_COLUMNS} FROM mcp_servers WHERE name = ?"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        match row {
            Some(row) => {
                let env = self.fetch_env(row.id).await?;
                Ok(Some(row_to_server(row, env)?))
            }
            None => Ok(None),
        }
    }

    async fn find_tool_by_name(
        &self,
        server_id: i64,
        name: &str,
    ) -> Result<Option<McpTool>, CatalogError> {
        let row = sqlx::query_as::<_, McpToolRow>(
            "SELECT id, server_id, name, description, input_schema FROM mcp_tools WHERE server_id = ? AND name = ?",
        )
        .bind(server_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        Ok(row.map(row_to_tool))
    }
}

#[async_trait]
impl McpCatalogRepository for SqliteCatalogRepository {
    async fn insert_server(&self, server: NewMcpServer) -> Result<McpServer, CatalogError> {
        server.validate().map_err(CatalogError::Invalid)?;

        let args_json = serde_json::to_string(&server.args)
            .map_err(|e| CatalogError::Internal(format!("Failed to encode args: {e}")))?;
        let startup_timeout_ms = server
            .startup_timeout_ms
            .map(i64::try_from)
            .transpose()
            .map_err(|_| CatalogError::Invalid("startup timeout is too large".to_string()))?;

        // Server and env rows are written together
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let result = sqlx::query(
            r"
            INSERT INTO mcp_servers (name, transport, command, args, url, disabled, startup_timeout_ms)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&server.name)
        .bind(server.transport.as_str())
        .bind(&server.command)
        .bind(&args_json)
        .bind(&server.url)
        .bind(server.disabled)
        .bind(startup_timeout_ms)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(&e, &server.name))?;

        let server_id = result.last_insert_rowid();

        for entry in &server.env {
            sqlx::query("INSERT INTO mcp_server_env (server_id, key, value) VALUES (?, ?, ?)")
                .bind(server_id)
                .bind(&entry.key)
                .bind(encode_env_value(&entry.value))
                .execute(&mut *tx)
                .await
                .map_err(internal)?;
        }

        tx.commit().await.map_err(internal)?;

        tracing::debug!(server_id, server_name = %server.name, "Inserted MCP server");
        self.get_server(server_id).await
    }

    async fn get_server(&self, id: i64) -> Result<McpServer, CatalogError> {
        let row = sqlx::query_as::<_, McpServerRow>(&format!(
            "SELECT {SERVER_COLUMNS} FROM mcp_servers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let env = self.fetch_env(id).await?;
        row_to_server(row, env)
    }

    async fn list_servers(&self) -> Result<Vec<McpServer>, CatalogError> {
        let rows = sqlx::query_as::<_, McpServerRow>(&format!(
            "SELECT {SERVER_COLUMNS} FROM mcp_servers ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        let mut servers = Vec::with_capacity(rows.len());
        for row in rows {
            let env = self.fetch_env(row.id).await?;
            servers.push(row_to_server(row, env)?);
        }

        Ok(servers)
    }

    async fn set_server_disabled(&self, id: i64, disabled: bool) -> Result<(), CatalogError> {
        let result = sqlx::query("UPDATE mcp_servers SET disabled = ? WHERE id = ?")
            .bind(disabled)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete_server(&self, id: i64) -> Result<(), CatalogError> {
        // Env vars and tools are deleted via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM mcp_servers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn insert_tool(&self, server_id: i64, tool: NewMcpTool) -> Result<McpTool, CatalogError> {
        if tool.name.trim().is_empty() {
            return Err(CatalogError::Invalid("MCP tool name cannot be empty".to_string()));
        }

        // Verify server exists
        let _ = self.get_server(server_id).await?;

        let schema_json = serde_json::to_string(&tool.input_schema)
            .map_err(|e| CatalogError::Internal(format!("Failed to encode input schema: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO mcp_tools (server_id, name, description, input_schema) VALUES (?, ?, ?, ?)",
        )
        .bind(server_id)
        .bind(&tool.name)
        .bind(&tool.description)
        .bind(&schema_json)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(&e, &tool.name))?;

        Ok(McpTool {
            id: result.last_insert_rowid(),
            server_id,
            name: tool.name,
            description: tool.description,
            input_schema: tool.input_schema,
        })
    }

    async fn list_tools(&self, server_id: i64) -> Result<Vec<McpTool>, CatalogError> {
        let rows = sqlx::query_as::<_, McpToolRow>(
            "SELECT id, server_id, name, description, input_schema FROM mcp_tools WHERE server_id = ? ORDER BY name",
        )
        .bind(server_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows.into_iter().map(row_to_tool).collect())
    }

    async fn delete_tool(&self, tool_id: i64) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM mcp_tools WHERE id = ?")
            .bind(tool_id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(tool_id.to_string()));
        }

        Ok(())
    }
}

impl SqliteCatalogRepository {
    /// Fetch and decode environment variables for a server, in insertion order.
    async fn fetch_env(&self, server_id: i64) -> Result<Vec<McpEnvEntry>, CatalogError> {
        let rows = sqlx::query_as::<_, EnvRow>(
            "SELECT key, value FROM mcp_server_env WHERE server_id = ? ORDER BY id",
        )
        .bind(server_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        let mut env = Vec::with_capacity(rows.len());
        for row in rows {
            let decoded_value = decode_env_value(&row.value)?;
            env.push(McpEnvEntry::new(row.key, decoded_value));
        }

        Ok(env)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
