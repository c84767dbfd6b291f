//! Weighted personalized PageRank over a local adjacency list.

use slric_core::constants::{DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_WALK_TOLERANCE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    pub damping: f64,
    pub max_iterations: usize,
    /// Per-node tolerance; the L1 change is compared with `n * tolerance`.
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_WALK_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageRankOutcome {
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Personalized PageRank.
///
/// `adjacency[u]` lists `(v, weight)`; a node's mass is split proportionally
/// to its outgoing weights. Teleport and dangling mass both follow
/// `personalization`, which is normalized here. Iteration starts from the
/// uniform vector.
pub fn personalized_pagerank(
    adjacency: &[Vec<(usize, f64)>],
    personalization: &[f64],
    config: PageRankConfig,
) -> PageRankOutcome {
    let n = adjacency.len();
    if n == 0 {
        return PageRankOutcome {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let p_total: f64 = personalization.iter().sum();
    let p: Vec<f64> = if p_total > 0.0 {
        personalization.iter().map(|x| x / p_total).collect()
    } else {
        vec![1.0 / n as f64; n]
    };

    let out_wsum: Vec<f64> = adjacency
        .iter()
        .map(|edges| edges.iter().map(|&(_, w)| w.max(0.0)).sum())
        .collect();

    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];
    let threshold = n as f64 * config.tolerance;

    for iteration in 1..=config.max_iterations {
        let dangling_sum: f64 = out_wsum
            .iter()
            .zip(&scores)
            .filter(|(&ws, _)| ws == 0.0)
            .map(|(_, &s)| s)
            .sum();

        for (v, slot) in next.iter_mut().enumerate() {
            *slot = (config.damping * dangling_sum + (1.0 - config.damping)) * p[v];
        }
        for (u, edges) in adjacency.iter().enumerate() {
            let ws = out_wsum[u];
            if ws > 0.0 {
                for &(v, w) in edges {
                    if w > 0.0 {
                        next[v] += config.damping * scores[u] * (w / ws);
                    }
                }
            }
        }

        let diff: f64 = scores.iter().zip(&next).map(|(old, new)| (old - new).abs()).sum();
        std::mem::swap(&mut scores, &mut next);
        if diff < threshold {
            return PageRankOutcome {
                scores,
                iterations: iteration,
                converged: true,
            };
        }
    }

    PageRankOutcome {
        scores,
        iterations: config.max_iterations,
        converged: false,
    }
}
