//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXPORT_BATCH_SIZE, DEFAULT_SEPARATOR};

/// Configuration for delimited row export.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Field separator. Default: ";".
    pub separator: Option<String>,
    /// Rows buffered per write. Default: 1000.
    pub batch_size: Option<usize>,
    /// Append to an existing file instead of truncating it. Default: true.
    pub append: Option<bool>,
}

impl ExportConfig {
    pub fn effective_separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_EXPORT_BATCH_SIZE)
    }

    pub fn effective_append(&self) -> bool {
        self.append.unwrap_or(true)
    }
}
