//! Paths command handler.
//!
//! Displays the resolved data paths for diagnostics. Does not open the
//! database.

use std::path::Path;

use anyhow::Result;

use agentui_core::paths::DATABASE_FILE_NAME;

use crate::bootstrap::ENV_FILE_NAME;

/// Execute the paths command.
///
/// Prints `key = value` lines for the data root, database and `.env` file.
pub fn execute(data_root: &Path) -> Result<()> {
    println!("data_root = {}", data_root.display());
    println!(
        "database = {}",
        data_root.join("data").join(DATABASE_FILE_NAME).display()
    );
    println!("env_file = {}", data_root.join(ENV_FILE_NAME).display());
    Ok(())
}
