//! Import command handler.
//!
//! Reads markdown definition files and saves each as an Agent or Skill.
//! Every file is imported independently; failures are reported together.

use std::path::PathBuf;

use anyhow::{Context, Result};

use agentui_core::EntityKind;
use agentui_mcp::{ImportReport, ImportStatus};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the import command.
pub async fn execute(ctx: &CliContext, kind: EntityKind, files: Vec<PathBuf>) -> Result<()> {
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        documents.push((path.display().to_string(), text));
    }

    let report = ctx.mcp().import_documents(kind, documents).await;
    print_report(&report);

    if report.failed_count() > 0 {
        return Err(CliError::Data(format!(
            "{} of {} file(s) failed to import",
            report.failed_count(),
            report.outcomes.len()
        ))
        .into());
    }
    Ok(())
}

fn print_report(report: &ImportReport) {
    for outcome in &report.outcomes {
        match &outcome.status {
            ImportStatus::Imported { entity, warnings } => {
                println!(
                    "imported {} '{}' from {}",
                    entity.kind, entity.name, outcome.source
                );
                for warning in warnings {
                    println!("  warning: {warning}");
                }
            }
            ImportStatus::Failed { error } => {
                println!("failed   {}: {error}", outcome.source);
            }
        }
    }

    println!(
        "\n{} imported, {} failed, {} warning(s)",
        report.imported_count(),
        report.failed_count(),
        report.warning_count()
    );
}
