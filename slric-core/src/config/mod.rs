//! Configuration system for SLRIC.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod export_config;
pub mod influence_config;
pub mod propagation_config;
pub mod similarity_config;
pub mod slric_config;

pub use export_config::ExportConfig;
pub use influence_config::InfluenceConfig;
pub use propagation_config::{PropagationConfig, KNOWN_MODELS};
pub use similarity_config::{IntervalMethod, SimilarityConfig, TopologyNormalization};
pub use slric_config::{ConfigOverrides, SlricConfig};
