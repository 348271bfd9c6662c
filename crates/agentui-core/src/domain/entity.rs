//! Agents and Skills: the entities that own MCP selections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::selection::ServerSelection;

/// Kind of configurable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A long-running agent definition.
    Agent,
    /// A reusable skill definition.
    Skill,
}

impl EntityKind {
    /// Stable lowercase name, as stored and serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Skill => "skill",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "agent" | "agents" => Ok(Self::Agent),
            "skill" | "skills" => Ok(Self::Skill),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}

/// A persisted Agent or Skill. `(kind, name)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Database ID.
    pub id: i64,

    /// Agent or Skill.
    pub kind: EntityKind,

    /// Unique name within its kind.
    pub name: String,

    /// One-line description.
    #[serde(default)]
    pub description: String,

    /// Markdown instructions (the body of the exported definition file).
    #[serde(default)]
    pub body: String,

    /// Embedded MCP selections, in display order.
    #[serde(default)]
    pub mcp_selections: Vec<ServerSelection>,

    /// Last time the entity was saved.
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    /// Whether any selection references the given catalog server.
    pub fn references_server(&self, server_name: &str) -> bool {
        self.mcp_selections
            .iter()
            .any(|s| s.mcp_server == server_name)
    }
}

/// An Agent or Skill to be saved (inserted or replaced by `(kind, name)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntity {
    /// Agent or Skill.
    pub kind: EntityKind,

    /// Unique name within its kind.
    pub name: String,

    /// One-line description.
    #[serde(default)]
    pub description: String,

    /// Markdown instructions.
    #[serde(default)]
    pub body: String,

    /// Embedded MCP selections.
    #[serde(default)]
    pub mcp_selections: Vec<ServerSelection>,
}

impl NewEntity {
    /// Create an entity with no description, body or selections.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: String::new(),
            body: String::new(),
            mcp_selections: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the markdown body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a server selection.
    #[must_use]
    pub fn with_selection(mut self, selection: ServerSelection) -> Self {
        self.mcp_selections.push(selection);
        self
    }
}
