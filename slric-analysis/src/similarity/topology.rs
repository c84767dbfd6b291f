//! Topology distance between two weighted graphs, nodes matched by name.

use std::collections::BTreeSet;

use slric_core::config::TopologyNormalization;
use slric_core::errors::SimilarityError;
use slric_core::InfluenceGraph;

fn max_edge_weight(graph: &InfluenceGraph) -> f64 {
    graph.edges().map(|(_, _, w)| w).fold(0.0, f64::max)
}

fn edge_names(graph: &InfluenceGraph) -> impl Iterator<Item = (&str, &str)> + '_ {
    graph.edges().map(move |(a, b, _)| (graph.name(a), graph.name(b)))
}

/// Sum of edge-weight differences, divided by the largest edge weight and by
/// `|V|²` or `|E₁ ∪ E₂|²`.
///
/// A node present in only one graph contributes its whole weighted degree.
pub fn topology_distance(
    g1: &InfluenceGraph,
    g2: &InfluenceGraph,
    normalization: TopologyNormalization,
) -> Result<f64, SimilarityError> {
    let max_weight = max_edge_weight(g1).max(max_edge_weight(g2));
    if max_weight <= 0.0 {
        return Err(SimilarityError::NoEdges);
    }

    let names: BTreeSet<&str> = g1
        .node_indices()
        .map(|idx| g1.name(idx))
        .chain(g2.node_indices().map(|idx| g2.name(idx)))
        .collect();

    let mut total = 0.0;
    for &name in &names {
        match (g1.get_node(name), g2.get_node(name)) {
            (Some(a), Some(b)) => {
                let mut seen: BTreeSet<&str> = BTreeSet::new();
                for (to, w1) in g1.successors(a) {
                    let to_name = g1.name(to);
                    seen.insert(to_name);
                    let w2 = g2
                        .get_node(to_name)
                        .and_then(|t| g2.edge_weight(b, t))
                        .unwrap_or(0.0);
                    total += (w1 - w2).abs();
                }
                for (to, w2) in g2.successors(b) {
                    if !seen.contains(g2.name(to)) {
                        total += w2;
                    }
                }
            }
            (Some(a), None) => total += g1.weighted_degree(a),
            (None, Some(b)) => total += g2.weighted_degree(b),
            (None, None) => {}
        }
    }
    total /= max_weight;

    let count = match normalization {
        TopologyNormalization::Nodes => names.len(),
        TopologyNormalization::Edges => edge_names(g1)
            .chain(edge_names(g2))
            .collect::<BTreeSet<_>>()
            .len(),
    };
    let denominator = count as f64;
    Ok(total / denominator / denominator)
}
