//! MCP catalog domain types.
//!
//! These types are shared between the storage layer, the resolver and the
//! exported skill-definition format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::MAX_STARTUP_TIMEOUT_MS;

/// Transport used to reach an MCP server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    /// The launcher spawns the server and talks over stdin/stdout
    #[default]
    Stdio,
    /// External process reached over server-sent events
    Sse,
    /// External process reached over streamable HTTP
    Http,
}

impl McpTransport {
    /// Stable lowercase name, as stored and serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Sse => "sse",
            Self::Http => "http",
        }
    }

    /// Whether the server is reached over the network rather than spawned.
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Sse | Self::Http)
    }
}

impl std::fmt::Display for McpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for McpTransport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "sse" => Ok(Self::Sse),
            "http" | "streamable-http" => Ok(Self::Http),
            other => Err(format!("unknown MCP transport: {other}")),
        }
    }
}

/// Environment variable entry for MCP servers.
///
/// Note: Values are stored as base64-encoded strings in the database.
/// This is encoding, NOT encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpEnvEntry {
    /// Environment variable key
    pub key: String,
    /// Environment variable value
    pub value: String,
}

impl McpEnvEntry {
    /// Create a new environment variable entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A catalog MCP server that exists in the system with a database ID.
///
/// `name` is the identity used by selections and by exported skill files;
/// it is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    /// Database ID of the server.
    pub id: i64,

    /// Unique catalog name.
    pub name: String,

    /// Connection type.
    pub transport: McpTransport,

    /// Executable path or name. Required for stdio servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Default launch arguments.
    #[serde(default)]
    pub args: Vec<String>,

    /// Default environment for the server process.
    #[serde(default)]
    pub env: Vec<McpEnvEntry>,

    /// Endpoint for SSE/HTTP servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Administratively disabled servers never reach a resolved config.
    #[serde(default)]
    pub disabled: bool,

    /// Catalog default startup timeout; the global default applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_timeout_ms: Option<u64>,

    /// When the server was added.
    pub created_at: DateTime<Utc>,
}

impl McpServer {
    /// Look up a default environment value by key.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

/// A catalog MCP server to be inserted (no ID yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMcpServer {
    /// Unique catalog name.
    pub name: String,

    /// Connection type.
    pub transport: McpTransport,

    /// Executable path or name. Required for stdio servers.
    pub command: Option<String>,

    /// Default launch arguments.
    pub args: Vec<String>,

    /// Default environment for the server process.
    pub env: Vec<McpEnvEntry>,

    /// Endpoint for SSE/HTTP servers.
    pub url: Option<String>,

    /// Whether the server is administratively disabled.
    pub disabled: bool,

    /// Catalog default startup timeout.
    pub startup_timeout_ms: Option<u64>,
}

impl NewMcpServer {
    /// Create a new stdio-based catalog server.
    #[must_use]
    pub fn new_stdio(name: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            transport: McpTransport::Stdio,
            command: Some(command.into()),
            args,
            env: Vec::new(),
            url: None,
            disabled: false,
            startup_timeout_ms: None,
        }
    }

    /// Create a new remote (SSE or HTTP) catalog server.
    #[must_use]
    pub fn new_remote(name: impl Into<String>, transport: McpTransport, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transport,
            command: None,
            args: Vec::new(),
            env: Vec::new(),
            url: Some(url.into()),
            disabled: false,
            startup_timeout_ms: None,
        }
    }

    /// Add an environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push(McpEnvEntry::new(key, value));
        self
    }

    /// Set the catalog default startup timeout.
    #[must_use]
    pub const fn with_startup_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.startup_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set disabled status.
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Validate the definition based on its transport.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("MCP server name cannot be empty".to_string());
        }

        match self.transport {
            McpTransport::Stdio => {
                let command = self
                    .command
                    .as_ref()
                    .ok_or_else(|| "Stdio server requires command".to_string())?;

                if command.trim().is_empty() {
                    return Err("Stdio server command cannot be empty".to_string());
                }
            }
            McpTransport::Sse | McpTransport::Http => {
                let url = self
                    .url
                    .as_ref()
                    .ok_or_else(|| format!("{} server requires url", self.transport))?;

                if url.trim().is_empty() {
                    return Err(format!("{} server url cannot be empty", self.transport));
                }
            }
        }

        if let Some(timeout_ms) = self.startup_timeout_ms {
            if timeout_ms > MAX_STARTUP_TIMEOUT_MS {
                return Err(format!(
                    "Startup timeout must be at most {MAX_STARTUP_TIMEOUT_MS} ms, got {timeout_ms}"
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.env {
            if entry.key.is_empty() {
                return Err("Environment variable key cannot be empty".to_string());
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(format!("Duplicate environment variable: {}", entry.key));
            }
        }

        Ok(())
    }
}

/// A tool owned by a catalog server.
///
/// `name` is unique within the owning server only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpTool {
    /// Database ID of the tool.
    pub id: i64,

    /// ID of the owning catalog server.
    pub server_id: i64,

    /// Tool name (function name).
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// JSON Schema for input parameters.
    #[serde(default)]
    pub input_schema: serde_json::Value,
}

/// A tool to be inserted under an existing catalog server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMcpTool {
    /// Tool name (function name).
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// JSON Schema for input parameters.
    pub input_schema: serde_json::Value,
}

impl NewMcpTool {
    /// Create a new tool definition with an empty object schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input_schema: serde_json::json!({ "type": "object" }),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set the input schema.
    #[must_use]
    pub fn with_input_schema(mut self, schema: serde_json::Value) -> Self {
        self.input_schema = schema;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stdio_server() {
        let server = NewMcpServer::new_stdio(
            "filesystem",
            "npx",
            vec!["-y".to_string(), "@modelcontextprotocol/server-filesystem".to_string()],
        )
        .with_env("ROOT", "/srv")
        .with_startup_timeout_ms(5000);

        assert_eq!(server.name, "filesystem");
        assert_eq!(server.transport, McpTransport::Stdio);
        assert_eq!(server.command, Some("npx".to_string()));
        assert_eq!(server.env.len(), 1);
        assert_eq!(server.env[0].key, "ROOT");
        assert_eq!(server.startup_timeout_ms, Some(5000));
        assert!(server.validate().is_ok());
    }

    #[test]
    fn test_remote_server_requires_url() {
        let mut server = NewMcpServer::new_remote("search", McpTransport::Sse, "http://localhost:3001/sse");
        assert!(server.validate().is_ok());

        server.url = Some("  ".to_string());
        assert!(server.validate().unwrap_err().contains("url cannot be empty"));

        server.url = None;
        assert_eq!(server.validate().unwrap_err(), "sse server requires url");
    }

    #[test]
    fn test_stdio_server_requires_command() {
        let mut server = NewMcpServer::new_stdio("git", "", vec![]);
        assert!(server.validate().is_err());

        server.command = None;
        assert_eq!(server.validate().unwrap_err(), "Stdio server requires command");
    }

    #[test]
    fn test_startup_timeout_upper_bound() {
        let server = NewMcpServer::new_stdio("git", "uvx", vec![])
            .with_startup_timeout_ms(MAX_STARTUP_TIMEOUT_MS);
        assert!(server.validate().is_ok());

        let server = server.with_startup_timeout_ms(MAX_STARTUP_TIMEOUT_MS + 1);
        assert!(server.validate().unwrap_err().contains("at most 600000 ms"));
    }

    #[test]
    fn test_duplicate_env_keys_rejected() {
        let server = NewMcpServer::new_stdio("git", "uvx", vec![])
            .with_env("A", "1")
            .with_env("A", "2");
        assert!(server.validate().unwrap_err().contains("Duplicate"));
    }

    #[test]
    fn test_transport_parsing() {
        assert_eq!("stdio".parse::<McpTransport>(), Ok(McpTransport::Stdio));
        assert_eq!("SSE".parse::<McpTransport>(), Ok(McpTransport::Sse));
        assert_eq!("streamable-http".parse::<McpTransport>(), Ok(McpTransport::Http));
        assert!("websocket".parse::<McpTransport>().is_err());
        assert!(McpTransport::Http.is_remote());
        assert!(!McpTransport::Stdio.is_remote());
    }

    #[test]
    fn test_transport_serialization() {
        let json = serde_json::to_string(&McpTransport::Http).unwrap();
        assert_eq!(json, "\"http\"");
    }

    #[test]
    fn test_new_tool_defaults_to_object_schema() {
        let tool = NewMcpTool::new("read_file").with_description("Read a file");

        assert_eq!(tool.name, "read_file");
        assert_eq!(tool.description, "Read a file");
        assert_eq!(tool.input_schema["type"], "object");
    }
}
