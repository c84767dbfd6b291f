//! Similarity configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EPSILON;

/// How a score is widened into a tolerance interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntervalMethod {
    /// `[v − ε, v + ε]`
    Absolute,
    /// `[v·(1 − ε), v·(1 + ε)]`
    #[default]
    Relative,
}

/// Denominator used by the topology distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TopologyNormalization {
    /// Divide by |V|².
    #[default]
    Nodes,
    /// Divide by |E₁ ∪ E₂|².
    Edges,
}

/// Configuration for ranking and topology comparisons.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Measurement error. Default: 0.05.
    pub epsilon: Option<f64>,
    pub interval_method: Option<IntervalMethod>,
    pub topology_normalization: Option<TopologyNormalization>,
}

impl SimilarityConfig {
    pub fn effective_epsilon(&self) -> f64 {
        self.epsilon.unwrap_or(DEFAULT_EPSILON)
    }

    pub fn effective_interval_method(&self) -> IntervalMethod {
        self.interval_method.unwrap_or_default()
    }

    pub fn effective_topology_normalization(&self) -> TopologyNormalization {
        self.topology_normalization.unwrap_or_default()
    }
}
