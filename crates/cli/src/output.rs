//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for scan results
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Render rows as a rounded table
pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a success message
pub fn success_line(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

/// Format a warning message
pub fn warning_line(message: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), message)
}

/// Format an info message
pub fn info_line(message: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), message)
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Horizontal rule between report sections
pub fn separator() -> String {
    "-".repeat(28)
}
