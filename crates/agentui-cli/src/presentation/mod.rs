//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! Keep this module format-only: domain transforms belong in the service.

pub mod tables;
pub mod warnings;

// Re-export commonly used items
pub use tables::{format_optional, print_separator, truncate_string};
pub use warnings::print_warnings;
