//! Console display helpers.
//!
//! All user-facing diagnostics go through these functions; the engine and
//! renderers never print on their own.

use console::style;

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the no-release diagnostic to stderr.
///
/// Used by the non-JSON CLI path; the reason is the human-readable form, not
/// the machine reason code.
pub fn display_no_release(reason: &str, base_version: &str) {
    eprintln!(
        "{} {} (base version {})",
        style("→").yellow(),
        reason,
        base_version
    );
}
