//! slric-analysis: the SLRIC influence engine.
//!
//! - Direct: SRIC and LRIC voting-game indices per affected node
//! - Indirect: path aggregation, personalized walks, bipath reconciliation
//! - Centrality: aggregation and the `lric` / `sric` / `interdependence` / `graphsim` entry points
//! - Similarity: ranking and topology distances
//! - Export: delimited node and edge rows

pub mod centrality;
pub mod direct;
pub mod export;
pub mod indirect;
pub mod similarity;

pub use centrality::{graphsim, interdependence, lric, sric, CentralityReport};
pub use direct::{DirectInfluenceEngine, IndexKind};
pub use export::RowWriter;
