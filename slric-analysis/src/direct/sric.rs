//! SRIC: pivotality over all minimal winning coalitions up to a size cap,
//! weighted by direct and one-hop intensities between coalition members.

use petgraph::stable_graph::NodeIndex;
use slric_core::numeric::{approx_ge, definitely_lt, first_at_least, Combinations};
use slric_core::types::collections::FxHashMap;
use slric_core::InfluenceGraph;

/// Direct and indirect intensities between the players of one target,
/// keyed by sorted player position.
#[derive(Debug, Clone, Default)]
pub struct IntensityMatrix {
    entries: FxHashMap<(usize, usize), f64>,
}

impl IntensityMatrix {
    /// `p_ii = w(i→t) / indeg(t)` and, for an edge i→j between two players,
    /// `p_ij = min(w(i→j), w(j→t)) / indeg(t)`. The target never gets an entry.
    pub fn build(graph: &InfluenceGraph, target: NodeIndex, players: &[(NodeIndex, f64)]) -> Self {
        let in_degree = graph.node(target).in_degree;
        let mut entries = FxHashMap::default();
        if in_degree <= 0.0 {
            return Self { entries };
        }

        let position: FxHashMap<NodeIndex, usize> = players
            .iter()
            .enumerate()
            .map(|(pos, &(idx, _))| (idx, pos))
            .collect();

        for (i, &(source, w_direct)) in players.iter().enumerate() {
            if source == target {
                continue;
            }
            entries.insert((i, i), w_direct / in_degree);
            for (next, w_link) in graph.successors(source) {
                if next == source || next == target {
                    continue;
                }
                if let Some(&j) = position.get(&next) {
                    let w_next = players[j].1;
                    entries.insert((i, j), w_link.min(w_next) / in_degree);
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries.get(&(i, j)).copied().unwrap_or(0.0)
    }

    /// `Σ_j p_ij` over `members`.
    pub fn row_sum(&self, i: usize, members: &[usize]) -> f64 {
        members.iter().map(|&j| self.get(i, j)).sum()
    }
}

/// Raw SRIC scores for ascending `weights`, summed over coalition sizes
/// `min(group_size, n)` down to 1.
pub fn raw_sric_scores(
    weights: &[f64],
    quota: f64,
    group_size: usize,
    intensity: &IntensityMatrix,
) -> Vec<f64> {
    let n = weights.len();
    let mut raw = vec![0.0; n];
    if n == 0 {
        return raw;
    }

    for size in (1..=group_size.min(n)).rev() {
        if size == 1 {
            if let Some(first) = first_at_least(weights, 0, n - 1, quota) {
                for pos in first..n {
                    raw[pos] += intensity.get(pos, pos);
                }
            }
            continue;
        }

        let share = 1.0 / size as f64;
        let mut members: Vec<usize> = Vec::with_capacity(size);
        for prefix in Combinations::new(n - 1, size - 1) {
            let prefix_weight: f64 = prefix.iter().map(|&p| weights[p]).sum();
            if !definitely_lt(prefix_weight, quota) {
                continue;
            }
            let missing = quota - prefix_weight;
            let last_prefix = prefix[prefix.len() - 1];
            let Some(first) = first_at_least(weights, last_prefix + 1, n - 1, missing) else {
                continue;
            };

            members.clear();
            members.extend_from_slice(&prefix);
            members.push(first);
            let tail = members.len() - 1;

            let mut last = first;
            while last < n && !approx_ge(weights[last], quota) {
                members[tail] = last;
                for &i in &members {
                    if definitely_lt(weights[last] - weights[i], missing) {
                        raw[i] += intensity.row_sum(i, &members) * share;
                    }
                }
                last += 1;
            }
            // Members at or above quota only tip the coalition themselves.
            while last < n {
                members[tail] = last;
                raw[last] += intensity.row_sum(last, &members) * share;
                last += 1;
            }
        }
    }
    raw
}

/// SRIC influence of every in-neighbour on `target`, normalized to sum to 1.
pub fn sric_influence(
    graph: &InfluenceGraph,
    target: NodeIndex,
    players: &[(NodeIndex, f64)],
    quota: f64,
    group_size: usize,
) -> Vec<(NodeIndex, f64)> {
    let total: f64 = players.iter().map(|(_, w)| w).sum();
    if players.is_empty() || !approx_ge(total, quota) {
        return Vec::new();
    }

    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
    let weights: Vec<f64> = sorted.iter().map(|(_, w)| *w).collect();
    let intensity = IntensityMatrix::build(graph, target, &sorted);
    let raw = raw_sric_scores(&weights, quota, group_size, &intensity);

    let sum: f64 = raw.iter().sum();
    if sum <= 0.0 {
        return Vec::new();
    }
    sorted
        .iter()
        .zip(raw)
        .filter(|(_, score)| *score > 0.0)
        .map(|(&(idx, _), score)| (idx, score / sum))
        .collect()
}
