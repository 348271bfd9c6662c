//! Path utilities for agentui data directories.
//!
//! This module provides the canonical path resolution for all agentui components:
//! - Application data root
//! - Database location
//! - User `.env` overrides file
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately
//! - Resolution logic is pure where possible so it can be tested without
//!   touching the process environment

mod database;
mod error;
mod platform;

pub use database::{DATABASE_FILE_NAME, database_path, database_path_in};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, env_file_path, normalize_user_path, resolve_data_root};
