//! Property tests: oracle and LRIC against exhaustive search, SRIC
//! normalization, centrality and quality-graph invariants.

use proptest::prelude::*;

use slric_analysis::centrality::aggregate;
use slric_analysis::direct::{
    pivotal_shares, BranchAndBoundOracle, DirectInfluenceEngine, IndexKind, Objective,
    SubsetOracle, SubsetProblem,
};
use slric_analysis::indirect::{BipathReconciler, PathCombinator};
use slric_analysis::similarity::rank_distance;
use slric_core::config::IntervalMethod;
use slric_core::types::Ranking;
use slric_core::{Directedness, GraphParams, GroupSize, InfluenceGraph, QuotaSpec, SizeSpec};

/// Totals of every subset of `weights` with at most `max_items` members,
/// optionally leaving out position `skip`.
fn subset_totals(weights: &[f64], skip: Option<usize>, max_items: usize) -> Vec<f64> {
    let n = weights.len();
    (0u32..(1 << n))
        .filter(|mask| skip.map_or(true, |s| mask & (1 << s) == 0))
        .filter(|mask| mask.count_ones() as usize <= max_items)
        .map(|mask| (0..n).filter(|j| mask & (1 << j) != 0).map(|j| weights[j]).sum())
        .collect()
}

fn brute_force_shares(weights: &[f64], quota: f64, group_size: usize) -> Vec<f64> {
    (0..weights.len())
        .map(|i| {
            let min_value = quota - weights[i];
            subset_totals(weights, Some(i), group_size.saturating_sub(1))
                .into_iter()
                .filter(|&f| f >= min_value && f < quota)
                .fold(None, |best: Option<f64>, f| Some(best.map_or(f, |b| b.min(f))))
                .map_or(0.0, |f| weights[i] / (weights[i] + f))
        })
        .collect()
}

fn build_graph(n: usize, edges: &[(usize, usize, u8)]) -> InfluenceGraph {
    let triples: Vec<(String, String, Option<f64>)> = edges
        .iter()
        .filter(|&&(a, b, _)| a < n && b < n && a != b)
        .map(|&(a, b, w)| (format!("n{a}"), format!("n{b}"), Some(f64::from(w))))
        .collect();
    InfluenceGraph::from_edges(triples, Directedness::Directed).unwrap()
}

// Integer weights keep every subset total exact.
fn weights_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1u8..20, 2..9).prop_map(|ws| ws.into_iter().map(f64::from).collect())
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, u8)>> {
    prop::collection::vec((0..n, 0..n, 1u8..10), 1..n * 3)
}

proptest! {
    #[test]
    fn oracle_matches_exhaustive_search(
        weights in weights_strategy(),
        low in 0u8..40,
        width in 0u8..30,
        max_items in 1usize..6,
    ) {
        let (min_value, max_value) = (f64::from(low), f64::from(low) + f64::from(width));
        let in_window: Vec<f64> = subset_totals(&weights, None, max_items)
            .into_iter()
            .filter(|&t| t >= min_value && t <= max_value)
            .collect();

        let oracle = BranchAndBoundOracle::default();
        for objective in [Objective::Minimize, Objective::Maximize] {
            let found = oracle.solve(&SubsetProblem {
                weights: &weights,
                min_value,
                max_value,
                max_items,
                objective,
            });
            let expected = match objective {
                Objective::Minimize => in_window.iter().copied().reduce(f64::min),
                Objective::Maximize => in_window.iter().copied().reduce(f64::max),
            };
            prop_assert_eq!(found.as_ref().map(|s| s.total), expected);
            if let Some(solution) = found {
                prop_assert!(solution.selected.len() <= max_items);
                let total: f64 = solution.selected.iter().map(|&i| weights[i]).sum();
                prop_assert_eq!(total, solution.total);
            }
        }
    }
}

proptest! {
    #[test]
    fn lric_matches_exhaustive_search(
        weights in weights_strategy(),
        extra in 1u8..60,
        group_size in 1usize..7,
    ) {
        let mut weights = weights;
        weights.sort_by(|a, b| a.total_cmp(b));
        let max_weight = weights[weights.len() - 1];
        let quota = max_weight + f64::from(extra) / 2.0;

        let ours = pivotal_shares(&weights, quota, group_size, &BranchAndBoundOracle::default());
        let expected = brute_force_shares(&weights, quota, group_size);
        for (i, (a, b)) in ours.iter().zip(&expected).enumerate() {
            prop_assert!(
                (a - b).abs() < 1e-9,
                "weights {:?} q={} k={} position {}: got {}, expected {}",
                weights, quota, group_size, i, a, b
            );
        }
    }
}

proptest! {
    #[test]
    fn lric_shares_are_monotone_in_weight(
        weights in weights_strategy(),
        extra in 1u8..60,
    ) {
        let mut weights = weights;
        weights.sort_by(|a, b| a.total_cmp(b));
        let quota = weights[weights.len() - 1] + f64::from(extra) / 2.0;
        let shares = pivotal_shares(&weights, quota, 4, &BranchAndBoundOracle::default());
        for pair in shares.windows(2).zip(weights.windows(2)) {
            let (s, w) = pair;
            // A heavier player is pivotal whenever a lighter one is.
            if s[0] > 0.0 && w[1] > w[0] {
                prop_assert!(s[1] > 0.0);
            }
        }
    }
}

proptest! {
    #[test]
    fn sric_shares_sum_to_one_per_target(
        edges in edge_strategy(8),
        quota in 5.0f64..80.0,
        group_size in 1usize..5,
    ) {
        let mut g = build_graph(8, &edges);
        GraphParams::new(QuotaSpec::Percent(quota), SizeSpec::OutDegree).apply(&mut g).unwrap();
        let direct = DirectInfluenceEngine::new(IndexKind::Sric, GroupSize::Limited(group_size))
            .with_parallel(false)
            .compute(&g);
        for idx in direct.node_indices() {
            let total: f64 = direct.predecessors(idx).map(|(_, w)| w).sum();
            prop_assert!(total == 0.0 || (total - 1.0).abs() < 1e-9, "total={}", total);
        }
    }
}

proptest! {
    #[test]
    fn lric_influence_is_a_share(
        edges in edge_strategy(8),
        quota in 5.0f64..80.0,
    ) {
        let mut g = build_graph(8, &edges);
        GraphParams::new(QuotaSpec::Percent(quota), SizeSpec::OutDegree).apply(&mut g).unwrap();
        let direct = DirectInfluenceEngine::new(IndexKind::Lric, GroupSize::default()).compute(&g);
        for (from, to, w) in direct.edges() {
            prop_assert!(w > 0.0 && w <= 1.0);
            prop_assert!(g.has_edge(from, to), "influence only along input edges");
        }
    }
}

proptest! {
    #[test]
    fn aggregated_scores_sum_to_one_or_vanish(edges in edge_strategy(10)) {
        let mut g = build_graph(10, &edges);
        GraphParams::default().apply(&mut g).unwrap();
        let scores = aggregate(&g);
        prop_assert_eq!(scores.len(), g.node_count());
        let total: f64 = scores.values().sum();
        prop_assert!(total == 0.0 || (total - 1.0).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn quality_graph_has_one_direction_per_pair(
        influence_edges in edge_strategy(7),
        dependence_edges in edge_strategy(7),
        limit in 1usize..5,
    ) {
        let influence = build_graph(7, &influence_edges);
        let mut dependence = influence.empty_copy();
        for &(a, b, w) in &dependence_edges {
            let (Some(from), Some(to)) = (
                influence.get_node(&format!("n{a}")),
                influence.get_node(&format!("n{b}")),
            ) else {
                continue;
            };
            if from != to {
                dependence.set_edge(from, to, f64::from(w) / 10.0);
            }
        }

        let quality = BipathReconciler::new(PathCombinator::Product, limit)
            .reconcile(&influence, &dependence);
        for from in influence.node_indices() {
            for to in influence.node_indices() {
                prop_assert!(quality.net(from, to) == 0.0 || quality.net(to, from) == 0.0);
            }
        }
    }
}

proptest! {
    #[test]
    fn rank_distance_is_a_normalized_symmetric_measure(
        a in prop::collection::btree_map("[a-f]", 0.0f64..1.0, 0..6),
        b in prop::collection::btree_map("[a-f]", 0.0f64..1.0, 0..6),
        epsilon in 0.0f64..0.2,
    ) {
        let (r1, r2): (Ranking, Ranking) = (a, b);
        let forward = rank_distance(&r1, &r2, epsilon, IntervalMethod::Relative).unwrap();
        let backward = rank_distance(&r2, &r1, epsilon, IntervalMethod::Relative).unwrap();
        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert!((forward - backward).abs() < 1e-12);
        prop_assert_eq!(rank_distance(&r1, &r1, epsilon, IntervalMethod::Relative).unwrap(), 0.0);
    }
}
