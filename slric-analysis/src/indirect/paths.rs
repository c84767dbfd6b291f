//! Path aggregation by binary exponentiation of the influence graph.

use slric_core::InfluenceGraph;

use super::Propagation;

/// Strength of a two-edge path a→b→c.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCombinator {
    Sum,
    Min,
    Product,
}

impl PathCombinator {
    #[inline]
    pub fn combine(self, first: f64, second: f64) -> f64 {
        match self {
            Self::Sum => first + second,
            Self::Min => first.min(second),
            Self::Product => first * second,
        }
    }
}

/// How a new path strength merges with an existing a→c value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathAggregation {
    KeepMax,
    SumAll,
}

/// Composes the direct-influence graph with itself up to `path_limit` hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathAggregator {
    pub combinator: PathCombinator,
    pub aggregation: PathAggregation,
    pub path_limit: usize,
}

impl PathAggregator {
    pub fn new(combinator: PathCombinator, aggregation: PathAggregation, path_limit: usize) -> Self {
        Self {
            combinator,
            aggregation,
            path_limit,
        }
    }

    /// Strongest path by product of weights.
    pub fn max_product(path_limit: usize) -> Self {
        Self::new(PathCombinator::Product, PathAggregation::KeepMax, path_limit)
    }

    /// Strongest path by its weakest edge.
    pub fn max_min(path_limit: usize) -> Self {
        Self::new(PathCombinator::Min, PathAggregation::KeepMax, path_limit)
    }

    /// One composition step: a copy of `g0` extended by every a→b in `g0`
    /// followed by b→c in `g1`.
    pub fn compose(&self, g0: &InfluenceGraph, g1: &InfluenceGraph) -> InfluenceGraph {
        let mut result = g0.clone();
        for (a, b, w0) in g0.edges() {
            for (c, w1) in g1.successors(b) {
                let w = self.combinator.combine(w0, w1);
                let merged = match (result.edge_weight(a, c), self.aggregation) {
                    (None, _) => w,
                    (Some(old), PathAggregation::KeepMax) => old.max(w),
                    (Some(old), PathAggregation::SumAll) => old + w,
                };
                result.set_edge(a, c, merged);
            }
        }
        result
    }

    /// `paths(L)`: identity for L ≤ 1, `compose(paths(L-1), G)` for odd L,
    /// `compose(P, P)` with `P = paths(L/2)` for even L.
    pub fn paths(&self, graph: &InfluenceGraph, limit: usize) -> InfluenceGraph {
        if limit <= 1 {
            return graph.clone();
        }
        if limit % 2 == 0 {
            let half = self.paths(graph, limit / 2);
            self.compose(&half, &half)
        } else {
            let shorter = self.paths(graph, limit - 1);
            self.compose(&shorter, graph)
        }
    }
}

impl Propagation for PathAggregator {
    fn propagate(&self, direct: &InfluenceGraph) -> InfluenceGraph {
        let result = self.paths(direct, self.path_limit);
        tracing::debug!(
            limit = self.path_limit,
            combinator = ?self.combinator,
            edges = result.edge_count(),
            "paths aggregated"
        );
        result
    }
}
