//! Global centrality from direct and propagated influence.

pub mod aggregate;
pub mod models;
pub mod pipeline;

pub use aggregate::aggregate;
pub use models::{IndirectModel, InterdependenceModel};
pub use pipeline::{
    default_params, graphsim, interdependence, interdependence_with_params, lric, lric_with_params,
    sric, sric_with_params, CentralityReport,
};
