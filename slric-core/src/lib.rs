//! slric-core: shared foundation for the SLRIC influence engine.
//!
//! - Types: the `InfluenceGraph` arena, ingestion parameters, collection aliases
//! - Config: TOML configuration with layered resolution
//! - Errors: one `thiserror` enum per subsystem plus the aggregate `SlricError`
//! - Tracing: `tracing-subscriber` setup driven by `SLRIC_LOG`
//! - Numeric: the tolerance convention, binary search, normalization, combinations

pub mod config;
pub mod constants;
pub mod errors;
pub mod numeric;
pub mod tracing;
pub mod types;

pub use config::SlricConfig;
pub use errors::{SlricError, SlricResult};
pub use types::graph::{InfluenceGraph, InfluenceNode};
pub use types::params::{Directedness, GraphParams, GroupSize, QuotaSpec, SizeSpec};
