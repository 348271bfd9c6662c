//! Export command handler.

use std::path::PathBuf;

use anyhow::{Context, Result};

use agentui_core::EntityKind;

use crate::bootstrap::CliContext;
use crate::presentation::print_warnings;

/// Execute the export command.
///
/// Writes the rendered definition file to `out`, or to stdout when unset.
pub async fn execute(
    ctx: &CliContext,
    kind: EntityKind,
    name: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let exported = ctx.mcp().export_entity(kind, name).await?;

    match out {
        Some(path) => {
            tokio::fs::write(&path, &exported.content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {kind} '{name}' to {}", path.display());
        }
        None => print!("{}", exported.content),
    }

    print_warnings(&exported.warnings);
    Ok(())
}
