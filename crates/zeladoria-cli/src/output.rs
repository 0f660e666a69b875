//! Output formatting utilities

use crate::error::CliResult;
use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// One label/value line of a detail view
#[derive(Debug, Serialize, Tabled)]
pub struct DetailRow {
    pub field: String,
    pub value: String,
}

impl DetailRow {
    pub fn new(field: &str, value: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table if data.is_empty() => println!("{}", "No results".dimmed()),
        OutputFormat::Table => println!("{}", Table::new(data)),
        _ => print_serialized(&data, format)?,
    }
    Ok(())
}

/// Print a single item; tables show it as label/value rows
pub fn print_single<T: Serialize>(
    data: &T,
    details: impl FnOnce() -> Vec<DetailRow>,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(details())),
        _ => print_serialized(data, format)?,
    }
    Ok(())
}

/// Print any serializable value; tables fall back to JSON
pub fn print_serialized<T: Serialize + ?Sized>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?)
        }
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
    }
    Ok(())
}

/// Print a success message to stderr, keeping stdout for the command output
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}
