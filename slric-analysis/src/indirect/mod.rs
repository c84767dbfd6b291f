//! Indirect influence: propagate the direct-influence graph through the network.
//!
//! - `paths`: binary-doubling path composition (`max`, `maxmin`)
//! - `walker` + `pagerank`: personalized random walks (`pagerank`)
//! - `bipath`: two-layer interdependence reconciliation
//!
//! Every strategy returns a new graph over the same node indices and leaves
//! its input untouched.

pub mod bipath;
pub mod pagerank;
pub mod paths;
pub mod walker;

use slric_core::InfluenceGraph;

pub use bipath::{BipathReconciler, Layers, QualityGraph};
pub use pagerank::{personalized_pagerank, PageRankConfig, PageRankOutcome};
pub use paths::{PathAggregation, PathAggregator, PathCombinator};
pub use walker::PersonalizedWalker;

/// A single-layer propagation strategy.
pub trait Propagation: Send + Sync {
    fn propagate(&self, direct: &InfluenceGraph) -> InfluenceGraph;
}
