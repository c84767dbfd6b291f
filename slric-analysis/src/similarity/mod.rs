//! Similarity between rankings and between graph topologies.

pub mod ranking;
pub mod topology;

pub use ranking::rank_distance;
pub use topology::topology_distance;
