//! Configuration errors.

use super::error_code::{self, SlricErrorCode};

/// Errors that can occur during configuration loading, validation, and
/// when applying node-attribute overrides to a graph.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Override {field} has {actual} values but the graph has {expected} nodes")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
}

impl SlricErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
