//! Graph ingestion errors.

use super::error_code::{self, SlricErrorCode};

/// Errors that can occur while building an influence graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Invalid weight {weight} on edge {from} -> {to}: must be finite and non-negative")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("Unknown node: {0}")]
    UnknownNode(String),
}

impl SlricErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
