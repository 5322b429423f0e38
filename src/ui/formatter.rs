//! Console output for a release run.
//!
//! Colors come from `console`, which drops styling when the stream is not a terminal.

use console::style;

use crate::notice::Notice;

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

/// Print an operator notice.
pub fn display_notice(notice: &Notice) {
    println!("{} {}", style("⚠").yellow(), notice);
}

/// Print a multi-line report as-is.
pub fn display_report(report: &str) {
    print!("{}", report);
}
