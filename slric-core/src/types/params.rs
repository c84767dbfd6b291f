//! Graph ingestion parameters: quota, size, and coalition-size settings.

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use super::collections::FxHashMap;
use super::graph::InfluenceGraph;
use crate::constants::{DEFAULT_GROUP_SIZE, DEFAULT_QUOTA_PERCENT};
use crate::errors::ConfigError;

/// Whether input edges are one-way or symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Directedness {
    Directed,
    Undirected,
}

/// How each node's quota is derived.
#[derive(Debug, Clone, PartialEq)]
pub enum QuotaSpec {
    /// Share of weighted in-degree, in percent.
    Percent(f64),
    /// The same fixed quota for every node.
    Fixed(f64),
    /// One quota per node, in node insertion order.
    PerNode(Vec<f64>),
    /// Quotas by node name. Nodes not listed get no quota.
    ByName(FxHashMap<String, f64>),
}

impl Default for QuotaSpec {
    fn default() -> Self {
        Self::Percent(DEFAULT_QUOTA_PERCENT)
    }
}

/// How each node's size is derived.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SizeSpec {
    /// Weighted out-degree.
    #[default]
    OutDegree,
    /// The same size for every node.
    Fixed(f64),
    /// One size per node, in node insertion order.
    PerNode(Vec<f64>),
    /// Sizes by node name. Nodes not listed fall back to weighted out-degree.
    ByName(FxHashMap<String, f64>),
}

/// Maximal coalition size for the voting games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupSize {
    Limited(usize),
    /// Every other node may join a coalition (N − 1).
    Unbounded,
}

impl Default for GroupSize {
    fn default() -> Self {
        Self::Limited(DEFAULT_GROUP_SIZE)
    }
}

impl GroupSize {
    /// Concrete cap for a graph with `node_count` nodes.
    pub fn resolve(self, node_count: usize) -> usize {
        match self {
            Self::Limited(k) => k,
            Self::Unbounded => node_count.saturating_sub(1),
        }
    }
}

/// Node-attribute derivation applied after ingestion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphParams {
    pub quota: QuotaSpec,
    pub size: SizeSpec,
}

impl GraphParams {
    pub fn new(quota: QuotaSpec, size: SizeSpec) -> Self {
        Self { quota, size }
    }

    /// Set weighted in-degree, quota, and size on every node.
    ///
    /// Positional overrides must have exactly one value per node.
    pub fn apply(&self, graph: &mut InfluenceGraph) -> Result<(), ConfigError> {
        let indices: Vec<NodeIndex> = graph.node_indices().collect();

        if let QuotaSpec::PerNode(values) = &self.quota {
            check_len("quota", indices.len(), values.len())?;
        }
        if let SizeSpec::PerNode(values) = &self.size {
            check_len("size", indices.len(), values.len())?;
        }

        for (pos, &idx) in indices.iter().enumerate() {
            let in_degree = graph.weighted_in_degree(idx);
            let out_degree = graph.weighted_out_degree(idx);
            let name = graph.name(idx).to_string();

            let quota = match &self.quota {
                QuotaSpec::Percent(q) => Some(in_degree * q / 100.0),
                QuotaSpec::Fixed(q) => Some(*q),
                QuotaSpec::PerNode(values) => Some(values[pos]),
                QuotaSpec::ByName(map) => map.get(&name).copied(),
            };
            let size = match &self.size {
                SizeSpec::OutDegree => out_degree,
                SizeSpec::Fixed(s) => *s,
                SizeSpec::PerNode(values) => values[pos],
                SizeSpec::ByName(map) => map.get(&name).copied().unwrap_or(out_degree),
            };

            let node = graph.node_mut(idx);
            node.in_degree = in_degree;
            node.quota = quota;
            node.size = size;
        }
        Ok(())
    }
}

fn check_len(field: &str, expected: usize, actual: usize) -> Result<(), ConfigError> {
    if expected != actual {
        return Err(ConfigError::LengthMismatch {
            field: field.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
