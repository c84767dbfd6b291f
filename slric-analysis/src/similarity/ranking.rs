//! Ranking distance with measurement-error intervals.
//!
//! Each score is widened into an interval. For every key, the other keys of a
//! ranking split into lower, equivalent and upper sets; the distance counts
//! how often the two rankings put a pair on opposite sides, plus half of
//! every disagreement about equivalence.

use std::collections::BTreeSet;

use slric_core::config::IntervalMethod;
use slric_core::errors::SimilarityError;
use slric_core::types::Ranking;

/// Sentinel for "interval reaches below zero with nothing beneath it".
const BELOW_ZERO: isize = -2;

fn interval(value: f64, epsilon: f64, method: IntervalMethod) -> (f64, f64) {
    match method {
        IntervalMethod::Absolute => (value - epsilon, value + epsilon),
        IntervalMethod::Relative => (value * (1.0 - epsilon), value * (1.0 + epsilon)),
    }
}

/// One ranking sorted ascending, with the interval borders of every key.
struct RankSide<'a> {
    keys: Vec<&'a str>,
    /// Per key: (last position strictly below the interval, first position above it).
    borders: Vec<(isize, usize)>,
    /// Leading keys whose interval reaches below zero; they tie with missing keys.
    zero_border: usize,
}

impl<'a> RankSide<'a> {
    fn new(ranking: &'a Ranking, epsilon: f64, method: IntervalMethod, others_missing: bool) -> Self {
        let mut sorted: Vec<(&str, f64)> = ranking.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
        let values: Vec<f64> = sorted.iter().map(|(_, v)| *v).collect();

        let borders: Vec<(isize, usize)> = values
            .iter()
            .map(|&v| {
                let (low, high) = interval(v, epsilon, method);
                let above = values.partition_point(|&x| x <= high);
                let below = values.partition_point(|&x| x < low);
                let last_below = if below == 0 && low < 0.0 {
                    BELOW_ZERO
                } else {
                    below as isize - 1
                };
                (last_below, above)
            })
            .collect();

        let zero_border = if others_missing {
            borders.iter().take_while(|(low, _)| *low == BELOW_ZERO).count()
        } else {
            0
        };

        Self {
            keys: sorted.into_iter().map(|(k, _)| k).collect(),
            borders,
            zero_border,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }

    /// (lower, equivalent, upper) sets of `key`. `missing` are the keys this
    /// ranking lacks; they count as zero.
    fn sets(&self, key: &'a str, missing: &BTreeSet<&'a str>) -> [BTreeSet<&'a str>; 3] {
        let n = self.keys.len();
        let mut lower = BTreeSet::new();
        let mut equal = BTreeSet::new();
        let mut upper = BTreeSet::new();

        let position = self.position(key);
        match position {
            Some(pos) => {
                let (last_below, above) = self.borders[pos];
                let split = (last_below + 1).max(0) as usize;
                lower.extend(&self.keys[..split]);
                equal.extend(&self.keys[split..above]);
                upper.extend(&self.keys[above..n]);
            }
            None => {
                equal.extend(&self.keys[..self.zero_border]);
                upper.extend(&self.keys[self.zero_border..n]);
            }
        }

        if !missing.is_empty() {
            let reaches_zero = match position {
                Some(pos) => self.borders[pos].0 == BELOW_ZERO,
                None => true,
            };
            if reaches_zero {
                equal.extend(missing.iter().copied());
            } else {
                lower.extend(missing.iter().copied());
            }
        }
        [lower, equal, upper]
    }
}

/// Distance in [0, 1] between two rankings; 0 with fewer than two keys.
pub fn rank_distance(
    r1: &Ranking,
    r2: &Ranking,
    epsilon: f64,
    method: IntervalMethod,
) -> Result<f64, SimilarityError> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(SimilarityError::InvalidEpsilon(epsilon));
    }

    let keys: BTreeSet<&str> = r1.keys().chain(r2.keys()).map(String::as_str).collect();
    let k = keys.len();
    if k < 2 {
        return Ok(0.0);
    }
    let only_in_1: BTreeSet<&str> = keys.iter().copied().filter(|key| !r2.contains_key(*key)).collect();
    let only_in_2: BTreeSet<&str> = keys.iter().copied().filter(|key| !r1.contains_key(*key)).collect();

    let side1 = RankSide::new(r1, epsilon, method, !only_in_2.is_empty());
    let side2 = RankSide::new(r2, epsilon, method, !only_in_1.is_empty());

    let mut total = 0.0;
    for &key in &keys {
        let [lower1, equal1, upper1] = side1.sets(key, &only_in_2);
        let [lower2, equal2, upper2] = side2.sets(key, &only_in_1);
        total += upper1.intersection(&lower2).count() as f64;
        total += upper2.intersection(&lower1).count() as f64;
        total += equal1.symmetric_difference(&equal2).count() as f64 / 2.0;
    }
    Ok(total / (k * (k - 1)) as f64)
}
