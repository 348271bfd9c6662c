//! Resolution of per-entity MCP selections into a runtime configuration.
//!
//! ## Architecture
//!
//! - `overrides`: pure precedence rules for args, env and startup timeout
//! - `resolve`: catalog lookups, opt-in tool filtering, warning accumulation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use agentui_core::{ResolverSettings, ServerSelection};
//! use agentui_mcp::InMemoryCatalog;
//! use agentui_mcp::resolver::resolve;
//!
//! # async fn example() -> Result<(), agentui_core::CatalogError> {
//! let catalog = InMemoryCatalog::new();
//! let selections = vec![ServerSelection::new("filesystem").with_tool("read_file")];
//!
//! let config = resolve(&catalog, &selections, &ResolverSettings::default()).await?;
//! for warning in &config.warnings {
//!     println!("warning: {warning}");
//! }
//! # Ok(())
//! # }
//! ```

mod overrides;
mod resolve;

pub use overrides::{effective_args, effective_env, effective_startup_timeout};
pub use resolve::{resolve, to_selections};
