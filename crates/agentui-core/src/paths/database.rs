//! Database path resolution.
//!
//! Provides the canonical path to the agentui `SQLite` database file.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::data_root;

/// File name of the catalog/entity database.
pub const DATABASE_FILE_NAME: &str = "agentui.db";

/// Get the path to the agentui database file.
///
/// Returns `<data_root>/data/agentui.db`. The `data/` subdirectory is
/// created if it doesn't exist.
pub fn database_path() -> Result<PathBuf, PathError> {
    database_path_in(&data_root()?)
}

/// Database path under an explicit data root (e.g. from `--data-dir`).
pub fn database_path_in(root: &Path) -> Result<PathBuf, PathError> {
    let data_dir = root.join("data");

    fs::create_dir_all(&data_dir).map_err(|e| PathError::CreateFailed {
        path: data_dir.clone(),
        reason: e.to_string(),
    })?;

    Ok(data_dir.join(DATABASE_FILE_NAME))
}
