//! Direct influence: one weighted voting game per affected node.
//!
//! The output graph is an empty copy of the input with an edge a→b holding
//! the influence of player a on target b.

pub mod lric;
pub mod oracle;
pub mod sric;

use petgraph::stable_graph::NodeIndex;
use rayon::prelude::*;
use slric_core::{GroupSize, InfluenceGraph};
use tracing::{debug, info};

pub use lric::{lric_influence, pivotal_shares, PivotalityRecord, PivotalityStatus};
pub use oracle::{BranchAndBoundOracle, Objective, SubsetOracle, SubsetProblem, SubsetSolution};
pub use sric::{raw_sric_scores, sric_influence, IntensityMatrix};

/// Which power index to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Sric,
    Lric,
}

/// Computes the direct-influence graph.
pub struct DirectInfluenceEngine {
    kind: IndexKind,
    group_size: GroupSize,
    parallel: bool,
    oracle: Box<dyn SubsetOracle>,
}

impl DirectInfluenceEngine {
    pub fn new(kind: IndexKind, group_size: GroupSize) -> Self {
        Self {
            kind,
            group_size,
            parallel: true,
            oracle: Box::new(BranchAndBoundOracle::default()),
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the LRIC subset oracle.
    pub fn with_oracle(mut self, oracle: Box<dyn SubsetOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Influence of every player on every affected target.
    ///
    /// `graph` must already carry quota and in-degree (see `GraphParams::apply`).
    pub fn compute(&self, graph: &InfluenceGraph) -> InfluenceGraph {
        let mut result = graph.empty_copy();
        let group_size = self.group_size.resolve(graph.node_count());
        if group_size == 0 {
            return result;
        }

        let targets: Vec<(NodeIndex, f64)> = graph
            .node_indices()
            .filter_map(|idx| graph.node(idx).effective_quota().map(|q| (idx, q)))
            .collect();

        let solve = |&(target, quota): &(NodeIndex, f64)| {
            (target, self.target_influence(graph, target, quota, group_size))
        };
        let influences: Vec<(NodeIndex, Vec<(NodeIndex, f64)>)> = if self.parallel {
            targets.par_iter().map(solve).collect()
        } else {
            targets.iter().map(solve).collect()
        };

        for (target, list) in influences {
            for (player, value) in list {
                result.set_edge(player, target, value);
            }
        }

        info!(
            kind = ?self.kind,
            targets = targets.len(),
            edges = result.edge_count(),
            group_size,
            "direct influence computed"
        );
        result
    }

    fn target_influence(
        &self,
        graph: &InfluenceGraph,
        target: NodeIndex,
        quota: f64,
        group_size: usize,
    ) -> Vec<(NodeIndex, f64)> {
        let players: Vec<(NodeIndex, f64)> =
            graph.predecessors(target).filter(|&(_, w)| w > 0.0).collect();
        if players.is_empty() {
            return Vec::new();
        }

        let influence = match self.kind {
            IndexKind::Lric => lric_influence(&players, quota, group_size, self.oracle.as_ref()),
            IndexKind::Sric => sric_influence(graph, target, &players, quota, group_size),
        };
        debug!(
            target = %graph.name(target),
            players = players.len(),
            quota,
            influenced_by = influence.len(),
            "target resolved"
        );
        influence
    }
}
