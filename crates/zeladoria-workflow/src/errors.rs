//! Error types for the workflow layer

use zeladoria_store::StoreError;
use zeladoria_types::{ProtocolId, RecordError, Status};

/// Errors that can occur in workflow operations
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Invalid complaint: {0}")]
    Validation(#[from] RecordError),

    #[error("Protocol already registered: {0}")]
    DuplicateProtocol(ProtocolId),

    #[error("Record not found: {0}")]
    RecordNotFound(ProtocolId),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: Status, to: Status },

    /// The sheet could not be read before a change; nothing was written
    #[error("Could not read records: {0}")]
    Read(StoreError),

    /// The sheet rejected the overwrite; the change was not committed
    #[error("Could not save records: {0}")]
    Write(StoreError),

    #[error("Could not store photo: {0}")]
    Photo(StoreError),
}

impl WorkflowError {
    /// True if the user can fix the input and submit again
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation(_)
                | WorkflowError::DuplicateProtocol(_)
                | WorkflowError::RecordNotFound(_)
                | WorkflowError::InvalidTransition { .. }
                | WorkflowError::Photo(StoreError::UnsupportedImage)
        )
    }
}

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;
