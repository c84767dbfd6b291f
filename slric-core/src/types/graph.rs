//! The influence graph: a petgraph `StableGraph` arena with a name lookup table.
//!
//! Every derived graph of one computation (direct influence, propagated paths,
//! walk scores, interdependence quality) is built from `empty_copy()` or
//! `reversed()` of the input, so a `NodeIndex` means the same node in all of them.

use std::collections::BTreeMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use serde::Serialize;

use super::collections::FxHashMap;
use super::params::Directedness;
use crate::errors::GraphError;

/// Named per-node result scores (e.g. `lric_max`), kept sorted for export.
pub type NodeScores = BTreeMap<String, f64>;

/// Node name → score.
pub type Ranking = BTreeMap<String, f64>;

/// A node of the influence graph.
#[derive(Debug, Clone, Serialize)]
pub struct InfluenceNode {
    pub name: String,
    /// Voting threshold. `None` means the node can never be affected.
    pub quota: Option<f64>,
    /// Node size used when aggregating propagated influence.
    pub size: f64,
    /// Weighted in-degree.
    pub in_degree: f64,
    /// Result scores attached by the centrality entry points.
    pub scores: NodeScores,
}

impl InfluenceNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quota: None,
            size: 0.0,
            in_degree: 0.0,
            scores: NodeScores::new(),
        }
    }

    /// Quota if the node can be affected: `in_degree >= q > 0`.
    pub fn effective_quota(&self) -> Option<f64> {
        self.quota
            .filter(|&q| q > 0.0 && crate::numeric::approx_ge(self.in_degree, q))
    }
}

/// The underlying directed graph type. Edge weight is the influence value.
pub type InfluenceStableGraph = StableGraph<InfluenceNode, f64, Directed>;

/// Directed weighted graph with O(1) name lookup.
#[derive(Debug, Clone, Default)]
pub struct InfluenceGraph {
    /// The petgraph stable graph.
    pub graph: InfluenceStableGraph,
    /// Map from node name → NodeIndex.
    pub node_index: FxHashMap<String, NodeIndex>,
}

impl InfluenceGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: FxHashMap::default(),
        }
    }

    /// Build a graph from `(from, to, weight)` triples.
    ///
    /// A missing weight defaults to 1. Undirected input is symmetrized. A
    /// repeated edge overwrites the earlier weight.
    pub fn from_edges<I, S>(edges: I, directedness: Directedness) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (S, S, Option<f64>)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            let (from, to) = (from.as_ref(), to.as_ref());
            let weight = weight.unwrap_or(1.0);
            if !weight.is_finite() || weight < 0.0 {
                return Err(GraphError::InvalidWeight {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight,
                });
            }
            let a = graph.add_node(from);
            let b = graph.add_node(to);
            graph.set_edge(a, b, weight);
            if directedness == Directedness::Undirected {
                graph.set_edge(b, a, weight);
            }
        }
        Ok(graph)
    }

    /// Get or create the node named `name`.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&existing) = self.node_index.get(name) {
            return existing;
        }
        let idx = self.graph.add_node(InfluenceNode::new(name));
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Look up a node by name.
    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    /// Look up a node by name, failing on unknown names.
    pub fn require_node(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.get_node(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    pub fn node(&self, idx: NodeIndex) -> &InfluenceNode {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut InfluenceNode {
        &mut self.graph[idx]
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// All edges as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), *e.weight()))
    }

    pub fn edge_weight(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.graph
            .find_edge(from, to)
            .and_then(|e| self.graph.edge_weight(e).copied())
    }

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    /// Insert the edge or overwrite its weight.
    pub fn set_edge(&mut self, from: NodeIndex, to: NodeIndex, weight: f64) {
        match self.graph.find_edge(from, to) {
            Some(e) => self.graph[e] = weight,
            None => {
                self.graph.add_edge(from, to, weight);
            }
        }
    }

    /// Outgoing `(target, weight)` pairs.
    pub fn successors(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), *e.weight()))
    }

    /// Incoming `(source, weight)` pairs.
    pub fn predecessors(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.source(), *e.weight()))
    }

    pub fn weighted_in_degree(&self, idx: NodeIndex) -> f64 {
        self.predecessors(idx).map(|(_, w)| w).sum()
    }

    pub fn weighted_out_degree(&self, idx: NodeIndex) -> f64 {
        self.successors(idx).map(|(_, w)| w).sum()
    }

    /// In-degree plus out-degree, both weighted.
    pub fn weighted_degree(&self, idx: NodeIndex) -> f64 {
        self.weighted_in_degree(idx) + self.weighted_out_degree(idx)
    }

    /// Same nodes (with attributes), no edges.
    pub fn empty_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.graph.clear_edges();
        copy
    }

    /// Same nodes (with attributes), every edge reversed.
    pub fn reversed(&self) -> Self {
        let mut reversed = self.empty_copy();
        for (from, to, weight) in self.edges() {
            reversed.graph.add_edge(to, from, weight);
        }
        reversed
    }

    /// Attach `scores` to every node under `name`. Nodes missing from the map get 0.
    pub fn set_scores(&mut self, name: &str, scores: &FxHashMap<NodeIndex, f64>) {
        let indices: Vec<NodeIndex> = self.node_indices().collect();
        for idx in indices {
            let value = scores.get(&idx).copied().unwrap_or(0.0);
            self.graph[idx].scores.insert(name.to_string(), value);
        }
    }

    /// Translate index-keyed scores into a name-keyed ranking.
    pub fn ranking(&self, scores: &FxHashMap<NodeIndex, f64>) -> Ranking {
        scores
            .iter()
            .map(|(&idx, &value)| (self.name(idx).to_string(), value))
            .collect()
    }

    /// Weakly connected components (edge direction ignored).
    pub fn weakly_connected_components(&self) -> Vec<Vec<NodeIndex>> {
        let indices: Vec<NodeIndex> = self.node_indices().collect();
        let position: FxHashMap<NodeIndex, usize> =
            indices.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();

        let mut sets = UnionFind::<usize>::new(indices.len());
        for (from, to, _) in self.edges() {
            sets.union(position[&from], position[&to]);
        }

        // Group by root, keeping first-seen order for determinism.
        let mut root_slot: FxHashMap<usize, usize> = FxHashMap::default();
        let mut components: Vec<Vec<NodeIndex>> = Vec::new();
        for (i, &idx) in indices.iter().enumerate() {
            let root = sets.find(i);
            let slot = *root_slot.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(idx);
        }
        components
    }
}
