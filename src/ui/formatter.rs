//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;
use std::path::Path;

use crate::send::SendReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Report one rendered announcement file.
pub fn display_generated(path: &Path) {
    println!("{} {}", style("Wrote:").bold(), path.display());
}

/// One line per line of the summary: what ran and what the operator skipped.
pub fn format_send_report(report: &SendReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.dispatched.is_empty() {
        lines.push(format!("Sent: {}", report.dispatched.join(", ")));
    }
    if !report.skipped.is_empty() {
        lines.push(format!("Skipped: {}", report.skipped.join(", ")));
    }
    if lines.is_empty() {
        lines.push("No delivery actions were run".to_string());
    }
    lines
}

/// Summarize a send run.
pub fn display_send_report(report: &SendReport) {
    for line in format_send_report(report) {
        display_success(&line);
    }
}
