//! Aggregate error for the public entry points.

use super::error_code::SlricErrorCode;
use super::{ConfigError, ExportError, GraphError, SimilarityError};

/// Errors surfaced by the centrality entry points.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SlricError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),
}

impl SlricErrorCode for SlricError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
            Self::Similarity(e) => e.error_code(),
        }
    }
}

/// Result alias for the entry points.
pub type SlricResult<T> = Result<T, SlricError>;
