//! MCP configuration logic for agentui.
//!
//! - `resolver` flattens an entity's selections over the catalog into the
//!   effective runtime configuration
//! - `frontmatter` converts selections to and from the `mcp_tools` block of
//!   exported definition files
//! - `validation` holds the write-time checks applied when entities are saved
//! - `service` exposes all of the above over the repository ports
//! - `memory` provides in-memory repositories for tests and embedders

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod error;
pub mod frontmatter;
pub mod memory;
pub mod resolver;
pub mod service;
pub mod validation;

pub use error::McpConfigError;
pub use frontmatter::{
    FrontmatterError, McpToolsMap, ParsedSelections, SkillDocument, format_resolved,
    format_selections, parse_mcp_tools,
};
pub use memory::{InMemoryCatalog, InMemoryEntityRepository};
pub use resolver::{resolve, to_selections};
pub use service::{ExportedDocument, ImportOutcome, ImportReport, ImportStatus, McpConfigService};
pub use validation::{SelectionError, validate_selections};
