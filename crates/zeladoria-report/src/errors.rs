//! Report error types

use std::path::PathBuf;

/// Failures while producing a report document.
///
/// A missing photo is not one of them: the image section is left out.
#[derive(Debug, thiserror::Error)]
pub enum ReportRenderError {
    #[error("Cannot read photo {path}: {source}")]
    PhotoUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

/// Result type alias for report rendering
pub type ReportResult<T> = Result<T, ReportRenderError>;
