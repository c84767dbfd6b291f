//! Error handling for SLRIC.
//! One error enum per subsystem, `thiserror` only.
//!
//! Degenerate inputs (zero quota, unreachable quota, infeasible oracle calls)
//! are normal branches of the engine and never surface here.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod graph_error;
pub mod similarity_error;
pub mod slric_error;

pub use config_error::ConfigError;
pub use error_code::SlricErrorCode;
pub use export_error::ExportError;
pub use graph_error::GraphError;
pub use similarity_error::SimilarityError;
pub use slric_error::{SlricError, SlricResult};
