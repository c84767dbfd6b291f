//! Interdependence: joint path propagation over an influence layer and a
//! dependence layer, reconciled into one net-direction quality graph.

use petgraph::stable_graph::NodeIndex;
use slric_core::numeric::definitely_gt;
use slric_core::types::collections::FxHashSet;
use slric_core::InfluenceGraph;

use super::paths::PathCombinator;

/// Net directional strength between node pairs.
///
/// Stores, per direction, the largest strength ever recorded. The net value
/// of a→b is the positive part of `raw(a→b) - raw(b→a)`, so at most one
/// direction of a pair is positive.
#[derive(Debug, Clone)]
pub struct QualityGraph {
    raw: InfluenceGraph,
}

impl QualityGraph {
    /// Empty quality graph over the nodes of `template`.
    pub fn new(template: &InfluenceGraph) -> Self {
        Self {
            raw: template.empty_copy(),
        }
    }

    /// Raise the recorded a→b strength to `value`.
    ///
    /// Returns true when a→b had no record yet, even for a zero residual, or
    /// when the record grew. Only positive values are stored.
    pub fn record(&mut self, from: NodeIndex, to: NodeIndex, value: f64) -> bool {
        match self.raw.edge_weight(from, to) {
            None => {
                if value > 0.0 {
                    self.raw.set_edge(from, to, value);
                }
                true
            }
            Some(old) if value > 0.0 && definitely_gt(value, old) => {
                self.raw.set_edge(from, to, value);
                true
            }
            Some(_) => false,
        }
    }

    pub fn raw(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.raw.edge_weight(from, to).unwrap_or(0.0)
    }

    pub fn net(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        (self.raw(from, to) - self.raw(to, from)).max(0.0)
    }

    /// Graph of the positive net strengths.
    pub fn to_graph(&self) -> InfluenceGraph {
        let mut graph = self.raw.empty_copy();
        for (from, to, _) in self.raw.edges() {
            let net = self.net(from, to);
            if definitely_gt(net, 0.0) {
                graph.set_edge(from, to, net);
            }
        }
        graph
    }
}

/// Influence layer (index 0) and dependence layer (index 1).
#[derive(Debug, Clone)]
pub struct Layers {
    pub influence: InfluenceGraph,
    pub dependence: InfluenceGraph,
}

impl Layers {
    fn get(&self, index: usize) -> &InfluenceGraph {
        if index == 0 {
            &self.influence
        } else {
            &self.dependence
        }
    }

    fn get_mut(&mut self, index: usize) -> &mut InfluenceGraph {
        if index == 0 {
            &mut self.influence
        } else {
            &mut self.dependence
        }
    }
}

/// Runs the doubling recurrence over both layers.
#[derive(Debug, Clone, Copy)]
pub struct BipathReconciler {
    pub combinator: PathCombinator,
    pub path_limit: usize,
}

impl BipathReconciler {
    pub fn new(combinator: PathCombinator, path_limit: usize) -> Self {
        Self {
            combinator,
            path_limit,
        }
    }

    /// Quality graph after `path_limit` steps, over the nodes of `influence`.
    pub fn reconcile(&self, influence: &InfluenceGraph, dependence: &InfluenceGraph) -> QualityGraph {
        let layers = Layers {
            influence: influence.clone(),
            dependence: dependence.clone(),
        };
        let quality = QualityGraph::new(influence);
        let (_, quality) = self.bipath(&layers, quality, self.path_limit);
        tracing::debug!(limit = self.path_limit, "bipath reconciled");
        quality
    }

    fn bipath(&self, base: &Layers, quality: QualityGraph, limit: usize) -> (Layers, QualityGraph) {
        if limit <= 1 {
            let quality = seed_quality(base, quality);
            return (base.clone(), quality);
        }
        if limit % 2 == 0 {
            let (half, quality) = self.bipath(base, quality, limit / 2);
            self.extend(&half, &half, quality)
        } else {
            let (shorter, quality) = self.bipath(base, quality, limit - 1);
            self.extend(&shorter, base, quality)
        }
    }

    /// Extend both layers of `g0` one hop through `g1`.
    fn extend(&self, g0: &Layers, g1: &Layers, mut quality: QualityGraph) -> (Layers, QualityGraph) {
        let mut out = g0.clone();
        let nodes: Vec<NodeIndex> = g0.influence.node_indices().collect();
        for node in nodes {
            for index in 0..2 {
                let mediators: Vec<(NodeIndex, f64)> = g0.get(index).successors(node).collect();
                self.extend_from(node, &mediators, index, g0, g1, &mut out, &mut quality);
            }
        }
        (out, quality)
    }

    #[allow(clippy::too_many_arguments)]
    fn extend_from(
        &self,
        node: NodeIndex,
        mediators: &[(NodeIndex, f64)],
        index: usize,
        g0: &Layers,
        g1: &Layers,
        out: &mut Layers,
        quality: &mut QualityGraph,
    ) {
        let other = 1 - index;
        for &(mid, first) in mediators {
            for (end, second) in g1.get(index).successors(mid) {
                if end == node {
                    continue;
                }
                let w0 = self.combinator.combine(first, second);
                let w1 = match (
                    g0.get(other).edge_weight(mid, node),
                    g1.get(other).edge_weight(end, mid),
                ) {
                    (Some(a), Some(b)) => self.combinator.combine(a, b),
                    _ => 0.0,
                };

                let changed = if w0 >= w1 {
                    quality.record(node, end, w0 - w1)
                } else {
                    quality.record(end, node, w1 - w0)
                };
                if changed {
                    if w0 > 0.0 {
                        out.get_mut(index).set_edge(node, end, w0);
                    }
                    if w1 > 0.0 {
                        out.get_mut(other).set_edge(end, node, w1);
                    }
                }
            }
        }
    }
}

/// Base step: influence a→b against dependence b→a, recorded in the
/// net-positive direction; dependence a→b with no influence b→a counts as a→b.
fn seed_quality(layers: &Layers, mut quality: QualityGraph) -> QualityGraph {
    let influence = &layers.influence;
    let dependence = &layers.dependence;
    let nodes: Vec<NodeIndex> = influence.node_indices().collect();
    for node in nodes {
        let targets: FxHashSet<NodeIndex> = influence.successors(node).map(|(t, _)| t).collect();
        for (target, w) in influence.successors(node) {
            let v = w - dependence.edge_weight(target, node).unwrap_or(0.0);
            if v > 0.0 {
                quality.record(node, target, v);
            } else if v < 0.0 {
                quality.record(target, node, -v);
            }
        }
        for (source, w) in dependence.predecessors(node) {
            if !targets.contains(&source) {
                quality.record(source, node, w);
            }
        }
    }
    quality
}
