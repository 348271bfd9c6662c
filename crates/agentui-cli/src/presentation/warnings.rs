//! Warning output.

use agentui_core::ResolutionWarning;

/// Print resolution warnings to stderr, one per line.
pub fn print_warnings(warnings: &[ResolutionWarning]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}
