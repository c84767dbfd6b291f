//! Similarity errors.

use super::error_code::{self, SlricErrorCode};

/// Errors that can occur while comparing graphs or rankings.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    #[error("Topology distance needs at least one positive edge weight in either graph")]
    NoEdges,

    #[error("Epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),
}

impl SlricErrorCode for SimilarityError {
    fn error_code(&self) -> &'static str {
        error_code::SIMILARITY_ERROR
    }
}
