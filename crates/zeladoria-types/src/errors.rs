//! Error types for the record model

/// Errors raised while building or parsing complaint records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Invalid date '{0}', expected dd/mm/yyyy")]
    InvalidDate(String),
}

/// Result type alias for record operations
pub type RecordResult<T> = Result<T, RecordError>;
