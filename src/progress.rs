//! Progress reporting for catalog builds
//!
//! Provides a spinner while the build runs and styled header/summary output.

use crate::catalog::BuildReport;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a build is running
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a summary of a completed build
pub fn print_summary(report: &BuildReport) {
    let duration_secs = report.duration.as_secs_f64();
    let static_files = report.table.iter().filter(|r| r.is_static()).count();

    println!();
    println!("{}", style("Catalog Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Files:").bold(),
        format_number(report.total_files() as u64)
    );
    if static_files > 0 {
        println!(
            "  {} {}",
            style("Static:").bold(),
            format_number(static_files as u64)
        );
    }
    println!(
        "  {} {}",
        style("Subdirectories:").bold(),
        format_number(report.subdirs as u64)
    );
    println!("  {} {:.1}s", style("Duration:").bold(), duration_secs);
    println!("  {} {}", style("Table:").bold(), report.csv_path.display());
    println!("  {} {}", style("Descriptor:").bold(), report.json_path.display());
    println!();
}

/// Print a header at the start of the build
pub fn print_header(root: &str, workers: usize, identifier: &str) {
    println!();
    println!(
        "{} {}",
        style("frepp-catalog").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Source:").bold(), root);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!("  {} {}", style("Catalog:").bold(), identifier);
    println!();
}
