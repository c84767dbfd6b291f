//! Ranking and topology distances.

use slric_analysis::similarity::{rank_distance, topology_distance};
use slric_core::config::{IntervalMethod, TopologyNormalization};
use slric_core::errors::SimilarityError;
use slric_core::types::Ranking;
use slric_core::{Directedness, InfluenceGraph};

fn ranking(entries: &[(&str, f64)]) -> Ranking {
    entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}

fn graph(edges: &[(&str, &str, f64)]) -> InfluenceGraph {
    InfluenceGraph::from_edges(
        edges.iter().map(|&(a, b, w)| (a, b, Some(w))),
        Directedness::Directed,
    )
    .unwrap()
}

// ---- Ranking distance ----

#[test]
fn test_identical_rankings_have_zero_distance() {
    let r = ranking(&[("a", 0.5), ("b", 0.3), ("c", 0.2)]);
    for method in [IntervalMethod::Absolute, IntervalMethod::Relative] {
        assert_eq!(rank_distance(&r, &r, 0.05, method).unwrap(), 0.0);
    }
}

#[test]
fn test_reversed_rankings_have_distance_one() {
    let r1 = ranking(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
    let r2 = ranking(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);
    let d = rank_distance(&r1, &r2, 0.05, IntervalMethod::Relative).unwrap();
    assert!((d - 1.0).abs() < 1e-12);
}

#[test]
fn test_epsilon_absorbs_small_differences() {
    let r1 = ranking(&[("a", 1.00), ("b", 1.02)]);
    let r2 = ranking(&[("a", 1.02), ("b", 1.00)]);
    assert_eq!(rank_distance(&r1, &r2, 0.05, IntervalMethod::Relative).unwrap(), 0.0);
    // Without tolerance the order flips completely.
    assert!((rank_distance(&r1, &r2, 0.0, IntervalMethod::Absolute).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_tie_against_order_counts_half() {
    // a and b tie in the first ranking but are ordered in the second.
    let r1 = ranking(&[("a", 1.0), ("b", 1.0)]);
    let r2 = ranking(&[("a", 1.0), ("b", 2.0)]);
    let d = rank_distance(&r1, &r2, 0.0, IntervalMethod::Absolute).unwrap();
    // Each key disagrees about one equivalent member: 2 × 1/2 over 2 ordered pairs.
    assert!((d - 0.5).abs() < 1e-12);
}

#[test]
fn test_missing_keys_count_as_zero() {
    let r1 = ranking(&[("a", 0.6), ("b", 0.4)]);
    let r2 = ranking(&[("a", 0.6), ("b", 0.4), ("c", 0.0)]);
    let d = rank_distance(&r1, &r2, 0.05, IntervalMethod::Relative).unwrap();
    assert_eq!(d, 0.0);
}

#[test]
fn test_fewer_than_two_keys() {
    let r = ranking(&[("a", 1.0)]);
    assert_eq!(rank_distance(&r, &Ranking::new(), 0.05, IntervalMethod::Relative).unwrap(), 0.0);
}

#[test]
fn test_invalid_epsilon() {
    let r = ranking(&[("a", 1.0), ("b", 2.0)]);
    for eps in [-0.1, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            rank_distance(&r, &r, eps, IntervalMethod::Relative),
            Err(SimilarityError::InvalidEpsilon(_))
        ));
    }
}

#[test]
fn test_distance_is_symmetric() {
    let r1 = ranking(&[("a", 0.1), ("b", 0.5), ("c", 0.2), ("d", 0.2)]);
    let r2 = ranking(&[("a", 0.3), ("b", 0.1), ("c", 0.4), ("e", 0.2)]);
    let forward = rank_distance(&r1, &r2, 0.05, IntervalMethod::Relative).unwrap();
    let backward = rank_distance(&r2, &r1, 0.05, IntervalMethod::Relative).unwrap();
    assert!((forward - backward).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&forward));
}

// ---- Topology distance ----

#[test]
fn test_identical_graphs_have_zero_topology_distance() {
    let g = graph(&[("a", "b", 1.0), ("b", "c", 0.5)]);
    for norm in [TopologyNormalization::Nodes, TopologyNormalization::Edges] {
        assert_eq!(topology_distance(&g, &g.clone(), norm).unwrap(), 0.0);
    }
}

#[test]
fn test_weight_difference_normalized() {
    let g1 = graph(&[("a", "b", 1.0), ("b", "c", 1.0)]);
    let g2 = graph(&[("a", "b", 0.5), ("b", "c", 1.0)]);
    let by_nodes = topology_distance(&g1, &g2, TopologyNormalization::Nodes).unwrap();
    assert!((by_nodes - 0.5 / 9.0).abs() < 1e-12);
    let by_edges = topology_distance(&g1, &g2, TopologyNormalization::Edges).unwrap();
    assert!((by_edges - 0.5 / 4.0).abs() < 1e-12);
}

#[test]
fn test_node_missing_from_one_graph() {
    let g1 = graph(&[("a", "b", 1.0)]);
    let g2 = graph(&[("a", "b", 1.0), ("c", "a", 1.0)]);
    let d = topology_distance(&g1, &g2, TopologyNormalization::Nodes).unwrap();
    // c exists only in g2 and carries weighted degree 1.
    assert!((d - 1.0 / 9.0).abs() < 1e-12);
}

#[test]
fn test_edgeless_graphs_rejected() {
    let g = graph(&[("a", "b", 0.0)]);
    assert!(matches!(
        topology_distance(&g, &g, TopologyNormalization::Nodes),
        Err(SimilarityError::NoEdges)
    ));
}
