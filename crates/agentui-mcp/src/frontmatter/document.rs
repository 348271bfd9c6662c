//! Skill and agent definition files: YAML frontmatter plus a markdown body.

use gray_matter::Matter;
use gray_matter::engine::YAML;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tools_map::McpToolsMap;

/// A definition file that could not be read as frontmatter plus body.
///
/// Import treats this as a hard error for the one document only.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// The text has no `---` delimited frontmatter block.
    #[error("document has no frontmatter block")]
    Missing,

    /// The frontmatter is not valid YAML or has the wrong shape.
    #[error("invalid frontmatter: {0}")]
    Invalid(String),

    /// The frontmatter has no `name`.
    #[error("frontmatter is missing a name")]
    MissingName,

    /// The frontmatter could not be serialized.
    #[error("failed to render frontmatter: {0}")]
    Render(String),
}

#[derive(Debug, Deserialize)]
struct RawFrontmatter {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default, alias = "mcp-tools", alias = "mcpTools")]
    mcp_tools: Option<McpToolsMap>,

    #[serde(flatten)]
    extra: IndexMap<String, serde_json::Value>,
}

#[derive(Serialize)]
struct RenderedFrontmatter<'a> {
    name: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    mcp_tools: Option<&'a McpToolsMap>,

    #[serde(flatten)]
    extra: &'a IndexMap<String, serde_json::Value>,
}

/// A parsed skill or agent definition file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillDocument {
    pub name: String,
    pub description: String,
    pub mcp_tools: McpToolsMap,
    /// Frontmatter keys this codec does not interpret, kept for rendering.
    pub extra: IndexMap<String, serde_json::Value>,
    pub body: String,
}

impl SkillDocument {
    /// Create a document with no description, tools or body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a definition file.
    ///
    /// `mcp_tools` may also be spelled `mcp-tools` or `mcpTools`.
    pub fn parse(content: &str) -> Result<Self, FrontmatterError> {
        let matter = Matter::<YAML>::new();
        let parsed = matter
            .parse::<RawFrontmatter>(content)
            .map_err(|e| FrontmatterError::Invalid(e.to_string()))?;

        let raw = parsed.data.ok_or(FrontmatterError::Missing)?;
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(FrontmatterError::MissingName)?;

        Ok(Self {
            name,
            description: raw.description.unwrap_or_default(),
            mcp_tools: raw.mcp_tools.unwrap_or_default(),
            extra: raw.extra,
            body: parsed.content.trim_start_matches(['\r', '\n']).to_string(),
        })
    }

    /// Render the document with `mcp_tools` as the canonical key.
    pub fn render(&self) -> Result<String, FrontmatterError> {
        let frontmatter = RenderedFrontmatter {
            name: &self.name,
            description: (!self.description.is_empty()).then_some(self.description.as_str()),
            mcp_tools: (!self.mcp_tools.is_empty()).then_some(&self.mcp_tools),
            extra: &self.extra,
        };
        let yaml = serde_yml::to_string(&frontmatter)
            .map_err(|e| FrontmatterError::Render(e.to_string()))?;

        let mut rendered = format!("---\n{yaml}---\n");
        if !self.body.is_empty() {
            rendered.push('\n');
            rendered.push_str(&self.body);
            if !self.body.ends_with('\n') {
                rendered.push('\n');
            }
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESEARCH_SKILL: &str = "---
name: research
description: Browse and summarise sources
mcp_tools:
  filesystem:
    - read_file
    - write_file
  browser:
    - navigate
---

# Research

Collect sources first.
";

    #[test]
    fn test_parse_full_document() {
        let doc = SkillDocument::parse(RESEARCH_SKILL).unwrap();

        assert_eq!(doc.name, "research");
        assert_eq!(doc.description, "Browse and summarise sources");
        assert_eq!(
            doc.mcp_tools.get("filesystem").unwrap(),
            &vec!["read_file".to_string(), "write_file".to_string()]
        );
        assert_eq!(doc.mcp_tools.get("browser").unwrap().len(), 1);
        assert!(doc.body.starts_with("# Research"));
    }

    #[test]
    fn test_alternate_key_spellings() {
        for key in ["mcp-tools", "mcpTools"] {
            let content = format!("---\nname: demo\n{key}:\n  git:\n    - commit\n---\nbody\n");
            let doc = SkillDocument::parse(&content).unwrap();
            assert_eq!(doc.mcp_tools.get("git").unwrap(), &vec!["commit".to_string()]);
        }
    }

    #[test]
    fn test_no_tools_is_empty_map() {
        let doc = SkillDocument::parse("---\nname: plain\n---\nJust text.\n").unwrap();
        assert!(doc.mcp_tools.is_empty());
        assert!(doc.description.is_empty());
    }

    #[test]
    fn test_missing_frontmatter() {
        let result = SkillDocument::parse("# Just a heading\n\nNo metadata here.\n");
        assert!(matches!(result, Err(FrontmatterError::Missing)));
    }

    #[test]
    fn test_missing_name() {
        let result = SkillDocument::parse("---\ndescription: nameless\n---\nbody\n");
        assert!(matches!(result, Err(FrontmatterError::MissingName)));
    }

    #[test]
    fn test_wrong_tools_shape() {
        let result =
            SkillDocument::parse("---\nname: broken\nmcp_tools:\n  - filesystem\n---\nbody\n");
        assert!(matches!(result, Err(FrontmatterError::Invalid(_))));
    }

    #[test]
    fn test_render_then_parse() {
        let mut doc = SkillDocument::new("research");
        doc.description = "Browse the web".to_string();
        doc.mcp_tools
            .insert("browser".to_string(), vec!["navigate".to_string()]);
        doc.body = "# Research\n".to_string();

        let rendered = doc.render().unwrap();
        assert!(rendered.starts_with("---\n"));
        assert!(rendered.contains("name: research\n"));
        assert!(rendered.contains("mcp_tools:"));

        let reparsed = SkillDocument::parse(&rendered).unwrap();
        assert_eq!(reparsed.name, doc.name);
        assert_eq!(reparsed.description, doc.description);
        assert_eq!(reparsed.mcp_tools, doc.mcp_tools);
        assert_eq!(reparsed.body.trim(), "# Research");
    }

    #[test]
    fn test_unknown_keys_survive_rendering() {
        let doc = SkillDocument::parse("---\nname: tagged\nversion: 2\n---\nbody\n").unwrap();
        assert!(doc.extra.contains_key("version"));

        let rendered = doc.render().unwrap();
        assert!(rendered.contains("version: 2"));
    }
}
