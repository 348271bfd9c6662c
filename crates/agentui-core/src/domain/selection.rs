//! Per-entity MCP selections.
//!
//! A selection opts an Agent or Skill into a catalog server and a subset of
//! its tools, optionally overriding launch parameters. Selections are
//! embedded value objects: they have no identity of their own and are stored
//! and destroyed together with their owning entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

/// A loosely-typed override as it arrives from storage or an editor.
///
/// Well-formed values deserialize into `Value`; anything else is kept
/// verbatim in `Malformed` so the resolver can report it and fall back to
/// the catalog default instead of failing the whole entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Override<T> {
    /// A well-typed override.
    Value(T),
    /// Raw JSON that did not match the expected shape.
    Malformed(serde_json::Value),
}

impl<T> Override<T> {
    /// The typed value, if well-formed.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Malformed(_) => None,
        }
    }

    /// Whether this override failed to match its expected shape.
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// Selection of one catalog tool under a `ServerSelection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSelection {
    /// Name of the catalog tool, unique within the selected server.
    pub mcp_tool: String,

    /// Only enabled tool selections grant access.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Opaque permission document (allowed paths, size limits, ...).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub permissions: serde_json::Value,

    /// Opaque per-tool configuration (timeouts, ...).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub custom_config: serde_json::Value,
}

impl ToolSelection {
    /// Create an enabled tool selection with no permissions or config.
    pub fn new(mcp_tool: impl Into<String>) -> Self {
        Self {
            mcp_tool: mcp_tool.into(),
            enabled: true,
            permissions: serde_json::Value::Null,
            custom_config: serde_json::Value::Null,
        }
    }

    /// Set enabled status.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the permission document.
    #[must_use]
    pub fn with_permissions(mut self, permissions: serde_json::Value) -> Self {
        self.permissions = permissions;
        self
    }

    /// Set the custom config document.
    #[must_use]
    pub fn with_custom_config(mut self, config: serde_json::Value) -> Self {
        self.custom_config = config;
        self
    }
}

/// Selection of one catalog server by an Agent or Skill.
///
/// Override semantics:
/// - `custom_args` replaces the catalog args entirely when present and non-empty
/// - `custom_env` is merged key-by-key over the catalog env, selection winning
/// - `custom_startup_timeout_ms` replaces the catalog timeout when present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSelection {
    /// Name of the catalog server.
    pub mcp_server: String,

    /// Disabled selections contribute nothing to the resolved config.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Full replacement for the catalog args.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_args: Option<Override<Vec<String>>>,

    /// Per-key overrides for the catalog env.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_env: Option<Override<BTreeMap<String, String>>>,

    /// Replacement for the catalog startup timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_startup_timeout_ms: Option<Override<u64>>,

    /// Tools opted into, in display order.
    #[serde(default, alias = "tools")]
    pub selected_tools: Vec<ToolSelection>,

    /// Free-form annotations; never interpreted.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ServerSelection {
    /// Create an enabled selection of a catalog server with no tools.
    pub fn new(mcp_server: impl Into<String>) -> Self {
        Self {
            mcp_server: mcp_server.into(),
            enabled: true,
            custom_args: None,
            custom_env: None,
            custom_startup_timeout_ms: None,
            selected_tools: Vec::new(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Set enabled status.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Opt into a tool (enabled).
    #[must_use]
    pub fn with_tool(mut self, mcp_tool: impl Into<String>) -> Self {
        self.selected_tools.push(ToolSelection::new(mcp_tool));
        self
    }

    /// Add an arbitrary tool selection.
    #[must_use]
    pub fn with_tool_selection(mut self, selection: ToolSelection) -> Self {
        self.selected_tools.push(selection);
        self
    }

    /// Replace the catalog args.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.custom_args = Some(Override::Value(args));
        self
    }

    /// Override a single environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut env = match self.custom_env.take() {
            Some(Override::Value(env)) => env,
            _ => BTreeMap::new(),
        };
        env.insert(key.into(), value.into());
        self.custom_env = Some(Override::Value(env));
        self
    }

    /// Override the startup timeout.
    #[must_use]
    pub fn with_startup_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.custom_startup_timeout_ms = Some(Override::Value(timeout_ms));
        self
    }

    /// Names of the tools selected with `enabled = true`, in order.
    pub fn enabled_tool_names(&self) -> impl Iterator<Item = &str> {
        self.selected_tools
            .iter()
            .filter(|t| t.enabled)
            .map(|t| t.mcp_tool.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_deserializing() {
        let selection: ServerSelection = serde_json::from_value(json!({
            "mcpServer": "filesystem",
            "selectedTools": [{ "mcpTool": "read_file" }]
        }))
        .unwrap();

        assert!(selection.enabled);
        assert!(selection.custom_args.is_none());
        assert!(selection.selected_tools[0].enabled);
        assert!(selection.selected_tools[0].permissions.is_null());
    }

    #[test]
    fn test_malformed_overrides_are_captured() {
        let selection: ServerSelection = serde_json::from_value(json!({
            "mcpServer": "filesystem",
            "customArgs": "--root /tmp",
            "customEnv": { "DEBUG": 1 },
            "customStartupTimeoutMs": -5
        }))
        .unwrap();

        assert!(selection.custom_args.as_ref().unwrap().is_malformed());
        assert!(selection.custom_env.as_ref().unwrap().is_malformed());
        assert!(selection.custom_startup_timeout_ms.as_ref().unwrap().is_malformed());
    }

    #[test]
    fn test_well_formed_overrides() {
        let selection: ServerSelection = serde_json::from_value(json!({
            "mcpServer": "filesystem",
            "customArgs": ["--root", "/tmp"],
            "customEnv": { "DEBUG": "1" },
            "customStartupTimeoutMs": 1000
        }))
        .unwrap();

        assert_eq!(
            selection.custom_args.unwrap().value(),
            Some(&vec!["--root".to_string(), "/tmp".to_string()])
        );
        assert_eq!(
            selection.custom_env.unwrap().value().unwrap().get("DEBUG"),
            Some(&"1".to_string())
        );
        assert_eq!(selection.custom_startup_timeout_ms.unwrap().value(), Some(&1000));
    }

    #[test]
    fn test_tools_alias() {
        let selection: ServerSelection = serde_json::from_value(json!({
            "mcpServer": "git",
            "tools": [{ "mcpTool": "commit", "enabled": false }]
        }))
        .unwrap();

        assert_eq!(selection.selected_tools.len(), 1);
        assert_eq!(selection.enabled_tool_names().count(), 0);
    }

    #[test]
    fn test_with_env_accumulates() {
        let selection = ServerSelection::new("fs").with_env("A", "1").with_env("B", "2");
        let env = selection.custom_env.unwrap();
        assert_eq!(env.value().unwrap().len(), 2);
    }

    #[test]
    fn test_with_startup_timeout_replaces_malformed() {
        let mut selection = ServerSelection::new("fs");
        selection.custom_startup_timeout_ms = Some(Override::Malformed(json!("slow")));

        let selection = selection.with_startup_timeout_ms(5000);
        assert_eq!(
            selection.custom_startup_timeout_ms,
            Some(Override::Value(5000))
        );
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let selection = ServerSelection::new("fs").with_tool("read_file");
        let json = serde_json::to_value(&selection).unwrap();

        assert_eq!(json["mcpServer"], "fs");
        assert!(json.get("customArgs").is_none());
        assert!(json.get("metadata").is_none());
        assert!(json["selectedTools"][0].get("permissions").is_none());
    }
}
