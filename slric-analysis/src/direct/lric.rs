//! LRIC: pivotality through the cheapest winning completion.
//!
//! A player i with weight w_i is pivotal when some coalition of at most
//! `group_size - 1` other players has total f with `q - w_i <= f < q`. Its
//! influence is `w_i / (w_i + f)` for the smallest such f.
//!
//! The general case walks the players in ascending weight order with an
//! explicit status per record. Three facts keep the number of oracle calls
//! small:
//! - pivotality is monotone in weight, so a non-pivotal player marks every
//!   lighter player non-pivotal too;
//! - players of equal weight share their result;
//! - a witness for player i is also a completion for every member j of the
//!   witness (`f + w_i - w_j`), which tightens j's search window and lets j
//!   skip coalitions containing i.

use petgraph::stable_graph::NodeIndex;
use slric_core::numeric::{approx_eq, approx_ge, definitely_lt, tolerant_ceil};
use slric_core::types::collections::SmallVec4;

use super::oracle::{Objective, SubsetOracle, SubsetProblem};

/// Resolution state of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotalityStatus {
    Unresolved,
    /// Bound tightened by another player's witness, not solved yet.
    Bounded,
    /// Solved (or inherited from an equal-weight sibling).
    Considered,
    NotPivotal,
}

impl PivotalityStatus {
    fn is_resolved(self) -> bool {
        matches!(self, Self::Considered | Self::NotPivotal)
    }
}

/// Per-player working state, created fresh for each target node.
#[derive(Debug, Clone)]
pub struct PivotalityRecord {
    pub weight: f64,
    /// Smallest completion that makes the coalition winning: `q - w`.
    pub min_value: f64,
    /// Largest completion still worth looking for. Starts at `q`.
    pub bound: f64,
    pub status: PivotalityStatus,
    /// Positions whose coalitions were already accounted for by their witness.
    pub exceptions: SmallVec4<usize>,
}

impl PivotalityRecord {
    fn new(weight: f64, quota: f64) -> Self {
        Self {
            weight,
            min_value: quota - weight,
            bound: quota,
            status: PivotalityStatus::Unresolved,
            exceptions: SmallVec4::new(),
        }
    }
}

/// LRIC influence of every in-neighbour on one target.
///
/// `players` are `(source, edge weight)` pairs with positive weight. Returns
/// the pairs with non-zero influence.
pub fn lric_influence(
    players: &[(NodeIndex, f64)],
    quota: f64,
    group_size: usize,
    oracle: &dyn SubsetOracle,
) -> Vec<(NodeIndex, f64)> {
    let mut result = Vec::new();
    let mut others: Vec<(NodeIndex, f64)> = Vec::with_capacity(players.len());

    for &(idx, w) in players {
        if approx_ge(w, quota) {
            result.push((idx, 1.0));
        } else {
            others.push((idx, w));
        }
    }
    if others.is_empty() {
        return result;
    }

    let total: f64 = others.iter().map(|(_, w)| w).sum();
    if definitely_lt(total, quota) {
        return result;
    }
    if approx_eq(total, quota) {
        result.extend(others.iter().map(|&(idx, w)| (idx, w / quota)));
        return result;
    }

    let (min_w, max_w) = others
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, w)| {
            (lo.min(w), hi.max(w))
        });
    if approx_eq(min_w, max_w) {
        let share = 1.0 / tolerant_ceil(quota / max_w);
        result.extend(others.iter().map(|&(idx, _)| (idx, share)));
        return result;
    }

    others.sort_by(|a, b| a.1.total_cmp(&b.1));
    let weights: Vec<f64> = others.iter().map(|(_, w)| *w).collect();
    let shares = pivotal_shares(&weights, quota, group_size, oracle);
    result.extend(
        others
            .iter()
            .zip(shares)
            .filter(|(_, share)| *share > 0.0)
            .map(|(&(idx, _), share)| (idx, share)),
    );
    result
}

/// General-case resolver over ascending `weights` (all below `quota`).
///
/// Returns the influence of each position; non-pivotal players get 0.
pub fn pivotal_shares(
    weights: &[f64],
    quota: f64,
    group_size: usize,
    oracle: &dyn SubsetOracle,
) -> Vec<f64> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }
    let mut resolver = Resolver {
        records: weights.iter().map(|&w| PivotalityRecord::new(w, quota)).collect(),
        max_items: group_size.saturating_sub(1),
        oracle,
        oracle_calls: 0,
    };

    let mut pos = n / 2;
    loop {
        if !resolver.records[pos].status.is_resolved() {
            resolver.resolve(pos);
        }
        if pos == n - 1 {
            break;
        }
        pos = if pos > 0 && !resolver.records[pos - 1].status.is_resolved() {
            pos / 2
        } else {
            pos + 1
        };
    }
    // Anything the walk skipped over.
    for pos in 0..n {
        if !resolver.records[pos].status.is_resolved() {
            resolver.resolve(pos);
        }
    }

    tracing::trace!(players = n, oracle_calls = resolver.oracle_calls, "lric records resolved");

    resolver
        .records
        .iter()
        .map(|r| match r.status {
            PivotalityStatus::NotPivotal => 0.0,
            _ => r.weight / (r.weight + r.bound),
        })
        .collect()
}

struct Resolver<'o> {
    records: Vec<PivotalityRecord>,
    max_items: usize,
    oracle: &'o dyn SubsetOracle,
    oracle_calls: usize,
}

impl Resolver<'_> {
    /// Status and bound of the nearest resolved record with the same weight,
    /// looking left first.
    fn resolved_sibling(&self, pos: usize) -> Option<(PivotalityStatus, f64)> {
        let weight = self.records[pos].weight;
        let left = (0..pos).rev();
        let right = pos + 1..self.records.len();
        for side in [left.collect::<Vec<_>>(), right.collect()] {
            for j in side {
                let r = &self.records[j];
                if !approx_eq(r.weight, weight) {
                    break;
                }
                if r.status.is_resolved() {
                    return Some((r.status, r.bound));
                }
            }
        }
        None
    }

    /// `pos` and every lighter record cannot be pivotal.
    fn mark_not_pivotal_through(&mut self, pos: usize) {
        for r in &mut self.records[..=pos] {
            r.status = PivotalityStatus::NotPivotal;
        }
    }

    /// Nothing fits the window: final for a fresh record, keeps the bound otherwise.
    fn settle_without_witness(&mut self, pos: usize) {
        if self.records[pos].status == PivotalityStatus::Unresolved {
            self.mark_not_pivotal_through(pos);
        } else {
            self.records[pos].status = PivotalityStatus::Considered;
        }
    }

    fn resolve(&mut self, pos: usize) {
        if let Some((status, bound)) = self.resolved_sibling(pos) {
            let record = &mut self.records[pos];
            if status == PivotalityStatus::NotPivotal {
                record.status = PivotalityStatus::NotPivotal;
            } else {
                record.status = PivotalityStatus::Considered;
                record.bound = bound;
            }
            return;
        }

        let candidates: Vec<usize> = (0..self.records.len())
            .filter(|&j| {
                j != pos
                    && self.records[j].status != PivotalityStatus::NotPivotal
                    && !self.records[pos].exceptions.contains(&j)
            })
            .collect();
        if candidates.is_empty() {
            self.settle_without_witness(pos);
            return;
        }

        let candidate_weights: Vec<f64> = candidates.iter().map(|&j| self.records[j].weight).collect();
        let record = &self.records[pos];
        let problem = SubsetProblem {
            weights: &candidate_weights,
            min_value: record.min_value,
            max_value: record.bound,
            max_items: self.max_items,
            objective: Objective::Minimize,
        };
        self.oracle_calls += 1;
        let solution = self.oracle.solve(&problem);

        let Some(solution) = solution.filter(|s| !s.selected.is_empty()) else {
            self.settle_without_witness(pos);
            return;
        };

        let f = solution.total;
        if approx_eq(f, self.records[pos].bound)
            && self.records[pos].status == PivotalityStatus::Unresolved
        {
            // The cheapest completion already wins alone.
            self.mark_not_pivotal_through(pos);
            return;
        }

        let w_i = self.records[pos].weight;
        self.records[pos].status = PivotalityStatus::Considered;
        self.records[pos].bound = f;
        for &member in &solution.selected {
            let j = candidates[member];
            let v = f + w_i - self.records[j].weight;
            let other = &mut self.records[j];
            if !other.status.is_resolved() && definitely_lt(v, other.bound) {
                other.bound = v;
                other.status = PivotalityStatus::Bounded;
                other.exceptions.push(pos);
            }
        }
    }
}
