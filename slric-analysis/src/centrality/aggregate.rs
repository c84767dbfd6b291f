//! Collapse a propagated graph into one normalized score per node.

use petgraph::stable_graph::NodeIndex;
use slric_core::numeric::normalize;
use slric_core::types::collections::FxHashMap;
use slric_core::InfluenceGraph;

/// `score(n) ∝ Σ size(m) · w(n→m)` over edges with `m ≠ n`.
///
/// Every node gets an entry. Scores sum to 1 unless there is no inflow at
/// all, in which case they are all 0.
pub fn aggregate(graph: &InfluenceGraph) -> FxHashMap<NodeIndex, f64> {
    let mut scores: FxHashMap<NodeIndex, f64> =
        graph.node_indices().map(|idx| (idx, 0.0)).collect();
    for (from, to, weight) in graph.edges() {
        if from != to {
            *scores.entry(from).or_insert(0.0) += graph.node(to).size * weight;
        }
    }
    normalize(&mut scores);
    scores
}
