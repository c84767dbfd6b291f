//! Indirect influence by personalized random walks.
//!
//! Every node with outgoing influence seeds one personalized PageRank run on
//! its weakly connected component. Before the run, each other node of the
//! component gets an extra edge back to the seed, weighted by how little
//! outgoing influence it has, so walks keep returning to the seed.

use petgraph::stable_graph::NodeIndex;
use rayon::prelude::*;
use slric_core::numeric::approx_zero;
use slric_core::types::collections::FxHashMap;
use slric_core::InfluenceGraph;
use tracing::{debug, warn};

use super::pagerank::{personalized_pagerank, PageRankConfig};
use super::Propagation;

#[derive(Debug, Clone, Copy)]
pub struct PersonalizedWalker {
    pub config: PageRankConfig,
    pub parallel: bool,
}

impl PersonalizedWalker {
    pub fn new(config: PageRankConfig, parallel: bool) -> Self {
        Self { config, parallel }
    }

    /// Scores of every node of `component` for walks seeded at `seed`.
    fn walk_from(
        &self,
        component: &[NodeIndex],
        base: &[Vec<(usize, f64)>],
        out_degree: &[f64],
        seed: usize,
    ) -> Vec<f64> {
        let size = component.len() as f64;
        let mut adjacency = base.to_vec();
        for (m, edges) in adjacency.iter_mut().enumerate() {
            if m == seed {
                continue;
            }
            let extra = (size - out_degree[m] - 1.0).max(0.0);
            match edges.iter_mut().find(|(v, _)| *v == seed) {
                Some((_, w)) => *w += extra,
                None => edges.push((seed, extra)),
            }
        }

        let mut personalization = vec![0.0; component.len()];
        personalization[seed] = 1.0;
        let outcome = personalized_pagerank(&adjacency, &personalization, self.config);
        if !outcome.converged {
            warn!(
                seed = seed,
                iterations = outcome.iterations,
                "personalized walk did not converge"
            );
        }
        outcome.scores
    }
}

impl Default for PersonalizedWalker {
    fn default() -> Self {
        Self::new(PageRankConfig::default(), true)
    }
}

impl Propagation for PersonalizedWalker {
    fn propagate(&self, direct: &InfluenceGraph) -> InfluenceGraph {
        let mut result = direct.empty_copy();

        for component in direct.weakly_connected_components() {
            if component.len() < 2 {
                continue;
            }
            let local: FxHashMap<NodeIndex, usize> =
                component.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();
            let base: Vec<Vec<(usize, f64)>> = component
                .iter()
                .map(|&idx| {
                    direct
                        .successors(idx)
                        .filter_map(|(to, w)| local.get(&to).map(|&j| (j, w)))
                        .collect()
                })
                .collect();
            let out_degree: Vec<f64> = component
                .iter()
                .map(|&idx| direct.weighted_out_degree(idx))
                .collect();
            let seeds: Vec<usize> = (0..component.len()).filter(|&i| out_degree[i] > 0.0).collect();

            let run = |&seed: &usize| (seed, self.walk_from(&component, &base, &out_degree, seed));
            let walks: Vec<(usize, Vec<f64>)> = if self.parallel {
                seeds.par_iter().map(run).collect()
            } else {
                seeds.iter().map(run).collect()
            };

            for (seed, scores) in walks {
                for (m, score) in scores.into_iter().enumerate() {
                    if m != seed && !approx_zero(score) {
                        result.set_edge(component[seed], component[m], score);
                    }
                }
            }
            debug!(
                component_size = component.len(),
                seeds = seeds.len(),
                "component walked"
            );
        }
        result
    }
}
