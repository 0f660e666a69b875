//! Store error types

use zeladoria_types::RecordError;

/// Errors raised by record stores and photo storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The collection could not be read (network, permission, missing sheet)
    #[error("Read error: {0}")]
    Read(String),

    /// The collection could not be overwritten; nothing was committed
    #[error("Write error: {0}")]
    Write(String),

    /// The sheet was read but does not follow the record layout
    #[error("Malformed sheet at row {row}: {reason}")]
    Malformed { row: usize, reason: String },

    /// The store settings are unusable (bad endpoint, HTTP client setup)
    #[error("Invalid store configuration: {0}")]
    Config(String),

    #[error("Unsupported photo format")]
    UnsupportedImage,

    #[error("Photo storage error: {0}")]
    Photo(String),
}

impl StoreError {
    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        StoreError::Malformed {
            row,
            reason: reason.into(),
        }
    }

    pub(crate) fn bad_cell(row: usize, err: RecordError) -> Self {
        StoreError::malformed(row, err.to_string())
    }

    /// True for failures on the read path, which readers degrade to empty
    pub fn is_read_failure(&self) -> bool {
        matches!(self, StoreError::Read(_) | StoreError::Malformed { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
