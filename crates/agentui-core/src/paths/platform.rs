//! Data root resolution.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "AGENTUI_DATA_DIR";

/// Get the root directory for application data (database, `.env`).
///
/// Resolution order:
/// 1. `AGENTUI_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/agentui`)
///
/// The directory is created if it does not exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = resolve_data_root(env::var_os(DATA_DIR_ENV))?;

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Pure resolution step behind [`data_root`]; does not touch the filesystem.
pub fn resolve_data_root(override_dir: Option<OsString>) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return normalize_user_path(&dir.to_string_lossy());
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("agentui"))
}

/// Location of the `.env` file that stores user overrides.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}
