//! The exported definition-file format.
//!
//! Selections round-trip through plain-text skill files as a flat
//! `mcp_tools: { server: [tool, ...] }` map in YAML frontmatter. Only
//! opt-ins survive the trip; overrides, permissions and disabled entries
//! are dropped on export.

mod document;
mod tools_map;

pub use document::{FrontmatterError, SkillDocument};
pub use tools_map::{McpToolsMap, ParsedSelections, format_resolved, format_selections, parse_mcp_tools};
