//! CLI error types

use thiserror::Error;
use zeladoria_report::ReportRenderError;
use zeladoria_store::StoreError;
use zeladoria_workflow::WorkflowError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workflow rejected or failed the operation
    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    /// Record store could not be set up
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Report could not be produced
    #[error("Report error: {0}")]
    Report(#[from] ReportRenderError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
