//! Bounded 0/1 subset-sum oracle used by the LRIC resolver.
//!
//! Given positive weights, a value window `[min_value, max_value]` and a
//! cardinality cap, find the subset whose total lies in the window and is
//! optimal for the requested objective.

use slric_core::numeric::{approx_eq, approx_ge, approx_le, definitely_gt, definitely_lt};
use slric_core::types::collections::SmallVec8;

/// Which total the oracle optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    Maximize,
    Minimize,
}

/// One oracle query.
#[derive(Debug, Clone)]
pub struct SubsetProblem<'a> {
    pub weights: &'a [f64],
    pub min_value: f64,
    pub max_value: f64,
    pub max_items: usize,
    pub objective: Objective,
}

/// An optimal selection: positions into `SubsetProblem::weights`, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetSolution {
    pub total: f64,
    pub selected: SmallVec8<usize>,
}

/// Pluggable subset-sum solver.
pub trait SubsetOracle: Send + Sync {
    /// Returns `None` when no subset fits the window and the cardinality cap.
    fn solve(&self, problem: &SubsetProblem<'_>) -> Option<SubsetSolution>;
}

/// Exact depth-first branch-and-bound over weights sorted in descending order.
///
/// Pruning uses prefix sums: with `r` slots left from position `p`, the most
/// that can still be added is the sum of the next `r` sorted weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBoundOracle {
    /// Maximal number of search nodes expanded per query. `None` = unlimited.
    pub node_budget: Option<u64>,
}

impl BranchAndBoundOracle {
    pub fn new(node_budget: Option<u64>) -> Self {
        Self { node_budget }
    }
}

impl SubsetOracle for BranchAndBoundOracle {
    fn solve(&self, problem: &SubsetProblem<'_>) -> Option<SubsetSolution> {
        if definitely_lt(problem.max_value, problem.min_value) {
            return None;
        }

        let mut order: Vec<usize> = (0..problem.weights.len()).collect();
        order.sort_by(|&a, &b| problem.weights[b].total_cmp(&problem.weights[a]));
        let sorted: Vec<f64> = order.iter().map(|&i| problem.weights[i]).collect();

        let mut prefix = Vec::with_capacity(sorted.len() + 1);
        prefix.push(0.0);
        for w in &sorted {
            prefix.push(prefix[prefix.len() - 1] + w);
        }

        let mut search = Search {
            problem,
            sorted: &sorted,
            prefix: &prefix,
            stack: SmallVec8::new(),
            best: None,
            expanded: 0,
            exhausted: false,
            budget: self.node_budget,
        };
        search.visit(0, 0.0);

        if search.exhausted {
            tracing::warn!(
                budget = ?self.node_budget,
                players = problem.weights.len(),
                found = search.best.is_some(),
                "oracle node budget exhausted, returning best selection so far"
            );
        }

        search.best.map(|(total, picked)| {
            let mut selected: SmallVec8<usize> = picked.iter().map(|&p| order[p]).collect();
            selected.sort_unstable();
            SubsetSolution { total, selected }
        })
    }
}

struct Search<'a> {
    problem: &'a SubsetProblem<'a>,
    sorted: &'a [f64],
    prefix: &'a [f64],
    stack: SmallVec8<usize>,
    best: Option<(f64, SmallVec8<usize>)>,
    expanded: u64,
    exhausted: bool,
    budget: Option<u64>,
}

impl Search<'_> {
    /// Largest total reachable by adding at most `slots` items from `pos` on.
    fn reachable(&self, pos: usize, slots: usize) -> f64 {
        let end = (pos + slots).min(self.sorted.len());
        self.prefix[end] - self.prefix[pos]
    }

    fn in_window(&self, total: f64) -> bool {
        approx_ge(total, self.problem.min_value) && approx_le(total, self.problem.max_value)
    }

    fn improves(&self, total: f64) -> bool {
        match (&self.best, self.problem.objective) {
            (None, _) => true,
            (Some((best, _)), Objective::Minimize) => definitely_lt(total, *best),
            (Some((best, _)), Objective::Maximize) => definitely_gt(total, *best),
        }
    }

    fn visit(&mut self, pos: usize, total: f64) {
        if self.exhausted {
            return;
        }
        if let Some(budget) = self.budget {
            if self.expanded >= budget {
                self.exhausted = true;
                return;
            }
        }
        self.expanded += 1;

        if self.in_window(total) && self.improves(total) {
            self.best = Some((total, self.stack.clone()));
        }

        let slots = self.problem.max_items.saturating_sub(self.stack.len());
        if slots == 0 || pos >= self.sorted.len() {
            return;
        }

        match self.problem.objective {
            Objective::Minimize => {
                // Weights are positive: any extension of a window hit is larger.
                if self.in_window(total) {
                    return;
                }
                if let Some((best, _)) = &self.best {
                    if approx_ge(total, *best) {
                        return;
                    }
                }
            }
            Objective::Maximize => {
                if let Some((best, _)) = &self.best {
                    if approx_eq(*best, self.problem.max_value)
                        || approx_le(total + self.reachable(pos, slots), *best)
                    {
                        return;
                    }
                }
            }
        }
        if definitely_lt(total + self.reachable(pos, slots), self.problem.min_value) {
            return;
        }

        for next in pos..self.sorted.len() {
            let candidate = total + self.sorted[next];
            if definitely_gt(candidate, self.problem.max_value) {
                continue;
            }
            // Sorted descending: once the remaining items cannot reach the
            // window, no later start can either.
            if definitely_lt(total + self.reachable(next, slots), self.problem.min_value) {
                break;
            }
            self.stack.push(next);
            self.visit(next + 1, candidate);
            self.stack.pop();
            if self.exhausted {
                return;
            }
        }
    }
}
