//! Shared numeric utilities: the tolerance convention, binary search over
//! sorted weights, score normalization, and lexicographic combinations.
//!
//! Every floating-point comparison in the engine goes through the helpers
//! below so that normalization and random-walk drift are absorbed the same
//! way everywhere.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::constants::{ABS_TOLERANCE, REL_TOLERANCE};

/// `a == b` within the relative/absolute tolerance.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= (REL_TOLERANCE * a.abs().max(b.abs())).max(ABS_TOLERANCE)
}

/// `a == 0` within tolerance.
#[inline]
pub fn approx_zero(a: f64) -> bool {
    approx_eq(a, 0.0)
}

/// `a >= b`, treating values within tolerance as equal.
#[inline]
pub fn approx_ge(a: f64, b: f64) -> bool {
    a > b || approx_eq(a, b)
}

/// `a <= b`, treating values within tolerance as equal.
#[inline]
pub fn approx_le(a: f64, b: f64) -> bool {
    a < b || approx_eq(a, b)
}

/// `a < b` and not within tolerance of `b`.
#[inline]
pub fn definitely_lt(a: f64, b: f64) -> bool {
    a < b && !approx_eq(a, b)
}

/// `a > b` and not within tolerance of `b`.
#[inline]
pub fn definitely_gt(a: f64, b: f64) -> bool {
    a > b && !approx_eq(a, b)
}

/// Ceiling that snaps values within tolerance of an integer onto it,
/// so `ceil(0.3 / 0.1)` is 3 rather than 4.
#[inline]
pub fn tolerant_ceil(x: f64) -> f64 {
    let rounded = x.round();
    if approx_eq(x, rounded) {
        rounded
    } else {
        x.ceil()
    }
}

/// First position in `sorted[left..=right]` whose value reaches `target`
/// (within tolerance). `sorted` must be ascending.
pub fn first_at_least(sorted: &[f64], left: usize, right: usize, target: f64) -> Option<usize> {
    if left > right || right >= sorted.len() {
        return None;
    }
    let offset = sorted[left..=right].partition_point(|&w| !approx_ge(w, target));
    let idx = left + offset;
    (idx <= right).then_some(idx)
}

/// Divide every value by the total. An all-zero total leaves the values
/// untouched (they are all zero).
pub fn normalize<K: Eq + Hash>(scores: &mut FxHashMap<K, f64>) {
    let total: f64 = scores.values().sum();
    if total != 0.0 {
        for value in scores.values_mut() {
            *value /= total;
        }
    }
}

/// Lexicographic k-combinations of `0..n` as ascending index vectors.
///
/// `Combinations::new(4, 2)` yields `[0,1] [0,2] [0,3] [1,2] [1,3] [2,3]`.
/// `k == 0` or `k > n` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k == 0 || k > n,
        }
    }

    /// Advance `indices` to its lexicographic successor in place.
    fn advance(&mut self) {
        let k = self.indices.len();
        // Rightmost position that can still be incremented.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.done = true;
            return;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();
        self.advance();
        Some(current)
    }
}
