//! Export errors.

use super::error_code::{self, SlricErrorCode};

/// Errors that can occur while writing node or edge rows.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },
}

impl SlricErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_ERROR
    }
}
