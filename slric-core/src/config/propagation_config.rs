//! Indirect-propagation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DAMPING, DEFAULT_INTERDEPENDENCE_MODEL, DEFAULT_MAX_ITERATIONS, DEFAULT_PATH_LIMIT,
    DEFAULT_WALK_TOLERANCE,
};

/// Indirect models accepted in `propagation.models`.
pub const KNOWN_MODELS: [&str; 3] = ["max", "maxmin", "pagerank"];

/// Configuration for path aggregation, personalized walks, and interdependence.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PropagationConfig {
    /// Maximal path length (limpath). Default: 3.
    pub path_limit: Option<usize>,
    /// Indirect models to evaluate, subset of `max`, `maxmin`, `pagerank`. Default: `max`.
    #[serde(default)]
    pub models: Vec<String>,
    /// Interdependence path combinator: 1 = product, 2 = min, 3 = sum. Default: 1.
    pub interdependence_model: Option<u8>,
    /// Personalized walk damping factor. Default: 0.85.
    pub damping: Option<f64>,
    /// Personalized walk iteration cap. Default: 100.
    pub max_iterations: Option<usize>,
    /// Personalized walk per-node tolerance. Default: 1e-6.
    pub tolerance: Option<f64>,
}

impl PropagationConfig {
    /// Returns the effective path limit, defaulting to 3.
    pub fn effective_path_limit(&self) -> usize {
        self.path_limit.unwrap_or(DEFAULT_PATH_LIMIT)
    }

    /// Returns the model names to evaluate, defaulting to `["max"]`.
    pub fn effective_models(&self) -> Vec<String> {
        if self.models.is_empty() {
            vec!["max".to_string()]
        } else {
            self.models.clone()
        }
    }

    /// Returns the interdependence model selector, defaulting to 1.
    pub fn effective_interdependence_model(&self) -> u8 {
        self.interdependence_model
            .unwrap_or(DEFAULT_INTERDEPENDENCE_MODEL)
    }

    pub fn effective_damping(&self) -> f64 {
        self.damping.unwrap_or(DEFAULT_DAMPING)
    }

    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_WALK_TOLERANCE)
    }
}
