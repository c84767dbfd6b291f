//! Property tests for the numeric helpers.

use proptest::prelude::*;

use slric_core::numeric::{approx_eq, first_at_least, normalize, tolerant_ceil, Combinations};
use slric_core::types::FxHashMap;

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

proptest! {
    #[test]
    fn combinations_are_complete_and_ordered(n in 0usize..9, k in 1usize..6) {
        let all: Vec<Vec<usize>> = Combinations::new(n, k).collect();
        prop_assert_eq!(all.len(), binomial(n, k));
        for combo in &all {
            prop_assert_eq!(combo.len(), k);
            prop_assert!(combo.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(combo.iter().all(|&i| i < n));
        }
        prop_assert!(all.windows(2).all(|w| w[0] < w[1]), "lexicographic order");
    }
}

proptest! {
    #[test]
    fn first_at_least_matches_linear_scan(
        values in prop::collection::vec(0u16..100, 1..20),
        target in 0u16..110,
        left in 0usize..20,
    ) {
        let mut sorted: Vec<f64> = values.into_iter().map(f64::from).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let right = sorted.len() - 1;
        let target = f64::from(target);

        let expected = (left..=right).find(|&i| sorted[i] >= target);
        prop_assert_eq!(first_at_least(&sorted, left, right, target), expected);
    }
}

proptest! {
    #[test]
    fn normalize_sums_to_one(values in prop::collection::vec(0.0f64..10.0, 1..20)) {
        let mut scores: FxHashMap<usize, f64> = values.iter().copied().enumerate().collect();
        normalize(&mut scores);
        let total: f64 = scores.values().sum();
        if values.iter().all(|&v| v == 0.0) {
            prop_assert_eq!(total, 0.0);
        } else {
            prop_assert!(approx_eq(total, 1.0), "total={}", total);
        }
    }
}

proptest! {
    #[test]
    fn tolerant_ceil_snaps_integer_ratios(numerator in 1u32..1000, denominator in 1u32..50) {
        let w = f64::from(denominator) / 10.0;
        let q = w * f64::from(numerator);
        prop_assert_eq!(tolerant_ceil(q / w), f64::from(numerator));
    }
}
