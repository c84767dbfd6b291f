//! Data structures for SLRIC.
//! FxHashMap/SmallVec aliases, the `InfluenceGraph` arena, and ingestion parameters.

pub mod collections;
pub mod graph;
pub mod params;

pub use collections::{FxHashMap, FxHashSet};
pub use graph::{InfluenceGraph, InfluenceNode, NodeScores, Ranking};
pub use params::{Directedness, GraphParams, GroupSize, QuotaSpec, SizeSpec};
