//! Effective runtime MCP configuration.
//!
//! A `ResolvedConfig` is the flattened result of overlaying an entity's
//! selections on the catalog. It is what an MCP launcher consumes.

use serde::{Deserialize, Serialize};

use super::mcp::{McpEnvEntry, McpTransport};

/// A tool that survived resolution, with its opaque per-tool documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTool {
    /// Catalog tool name.
    pub name: String,

    /// Permission document, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub permissions: serde_json::Value,

    /// Custom config document, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub custom_config: serde_json::Value,
}

/// Effective launch parameters for one selected server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedServer {
    /// Catalog server name.
    pub name: String,

    /// Catalog transport.
    pub transport: McpTransport,

    /// Catalog command (never overridden per selection).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Effective args.
    pub args: Vec<String>,

    /// Effective env: catalog entries with selection overrides applied.
    pub env: Vec<McpEnvEntry>,

    /// Catalog endpoint for remote transports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Effective startup timeout.
    pub startup_timeout_ms: u64,

    /// Enabled tools, in selection order.
    pub tools: Vec<ResolvedTool>,
}

impl ResolvedServer {
    /// Look up an effective environment value by key.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Names of the enabled tools, in order.
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }
}

/// Which override field a `MalformedOverride` warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverrideField {
    /// `customArgs`
    CustomArgs,
    /// `customEnv`
    CustomEnv,
    /// `customStartupTimeoutMs`
    CustomStartupTimeoutMs,
}

impl std::fmt::Display for OverrideField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::CustomArgs => "customArgs",
            Self::CustomEnv => "customEnv",
            Self::CustomStartupTimeoutMs => "customStartupTimeoutMs",
        })
    }
}

/// A non-fatal problem found while resolving, formatting or importing.
///
/// Warnings never stop processing: the offending piece is dropped or
/// replaced by its catalog default and the rest of the entity survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolutionWarning {
    /// A selection names a server that is not in the catalog.
    DanglingServer { server: String },

    /// A tool selection names a tool the server does not own.
    DanglingTool { server: String, tool: String },

    /// An override did not have the expected shape; the default was used.
    MalformedOverride {
        server: String,
        field: OverrideField,
        detail: String,
    },

    /// The same server was selected more than once; later copies were skipped.
    DuplicateServerSelection { server: String },

    /// The same tool was selected more than once under one server.
    DuplicateToolSelection { server: String, tool: String },

    /// The catalog server is administratively disabled.
    ServerDisabled { server: String },
}

impl ResolutionWarning {
    /// The server name the warning concerns.
    pub fn server(&self) -> &str {
        match self {
            Self::DanglingServer { server }
            | Self::DanglingTool { server, .. }
            | Self::MalformedOverride { server, .. }
            | Self::DuplicateServerSelection { server }
            | Self::DuplicateToolSelection { server, .. }
            | Self::ServerDisabled { server } => server,
        }
    }
}

impl std::fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingServer { server } => {
                write!(f, "MCP server '{server}' is not in the catalog; skipped")
            }
            Self::DanglingTool { server, tool } => {
                write!(f, "MCP tool '{tool}' is not provided by server '{server}'; skipped")
            }
            Self::MalformedOverride {
                server,
                field,
                detail,
            } => write!(
                f,
                "Malformed {field} for MCP server '{server}' ({detail}); using catalog default"
            ),
            Self::DuplicateServerSelection { server } => {
                write!(f, "MCP server '{server}' is selected more than once; extra selection skipped")
            }
            Self::DuplicateToolSelection { server, tool } => {
                write!(f, "MCP tool '{tool}' is selected more than once under '{server}'")
            }
            Self::ServerDisabled { server } => {
                write!(f, "MCP server '{server}' is disabled in the catalog; skipped")
            }
        }
    }
}

/// The effective MCP configuration of one Agent or Skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Servers with at least one enabled tool, in selection order.
    pub servers: Vec<ResolvedServer>,

    /// Non-fatal issues encountered during resolution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ResolutionWarning>,
}

impl ResolvedConfig {
    /// Find a resolved server by name.
    pub fn server(&self, name: &str) -> Option<&ResolvedServer> {
        self.servers.iter().find(|s| s.name == name)
    }

    /// All enabled `(server, tool)` pairs, sorted.
    ///
    /// Useful for comparing two configs irrespective of tool ordering.
    pub fn enabled_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .servers
            .iter()
            .flat_map(|s| s.tools.iter().map(|t| (s.name.clone(), t.name.clone())))
            .collect();
        pairs.sort();
        pairs
    }

    /// Whether resolution produced nothing to launch.
    pub const fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(name: &str, tools: &[&str]) -> ResolvedServer {
        ResolvedServer {
            name: name.to_string(),
            transport: McpTransport::Stdio,
            command: Some("npx".to_string()),
            args: vec![],
            env: vec![McpEnvEntry::new("A", "1")],
            url: None,
            startup_timeout_ms: 30_000,
            tools: tools
                .iter()
                .map(|t| ResolvedTool {
                    name: (*t).to_string(),
                    permissions: serde_json::Value::Null,
                    custom_config: serde_json::Value::Null,
                })
                .collect(),
        }
    }

    #[test]
    fn test_enabled_pairs_sorted() {
        let config = ResolvedConfig {
            servers: vec![server("git", &["commit"]), server("fs", &["write", "read"])],
            warnings: vec![],
        };

        assert_eq!(
            config.enabled_pairs(),
            vec![
                ("fs".to_string(), "read".to_string()),
                ("fs".to_string(), "write".to_string()),
                ("git".to_string(), "commit".to_string()),
            ]
        );
        assert_eq!(config.server("fs").unwrap().env_value("A"), Some("1"));
    }

    #[test]
    fn test_warning_display_and_serialization() {
        let warning = ResolutionWarning::MalformedOverride {
            server: "fs".to_string(),
            field: OverrideField::CustomEnv,
            detail: "expected a map of strings".to_string(),
        };

        assert_eq!(warning.server(), "fs");
        assert!(warning.to_string().contains("customEnv"));

        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "malformedOverride");
        assert_eq!(json["field"], "customEnv");
    }
}
