//! Invariant tests for the decomposition engine.
//!
//! These verify properties that must hold for every input, on a large
//! randomized corpus drawn from mixed character classes.

use once_cell::sync::Lazy;
use passgauge::{Estimator, Match};
use proptest::prelude::*;

static ESTIMATOR: Lazy<Estimator> = Lazy::new(Estimator::default);

fn password_strategy() -> impl Strategy<Value = String> {
    let class = prop_oneof![
        5 => prop::char::range('a', 'z'),
        2 => prop::char::range('A', 'Z'),
        3 => prop::char::range('0', '9'),
        1 => prop::sample::select(vec!['!', '@', '#', '$', '%', '&', '*', '-', '.', '/', ' ']),
        1 => prop::sample::select(vec!['é', 'ß', 'ñ', 'λ', 'п', '密', '🔒']),
    ];
    proptest::collection::vec(class, 0..=40).prop_map(|chars| chars.into_iter().collect())
}

// =============================================================================
// Universal decomposition invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    /// Reconstruction, non-overlap, coverage, and sortedness in one pass
    /// over a large random corpus.
    #[test]
    fn decomposition_invariants(password in password_strategy()) {
        let estimate = ESTIMATOR.estimate(&password).expect("estimation never fails");
        let matches = estimate.matches();

        // Reconstruction: concatenated tokens equal the password exactly.
        let rebuilt: String = matches.iter().map(Match::token).collect();
        prop_assert_eq!(&rebuilt, &password);

        // Coverage: combined length equals the char count.
        let covered: usize = matches.iter().map(Match::len).sum();
        prop_assert_eq!(covered, password.chars().count());

        // Non-overlap: pairwise disjoint spans.
        for (i, a) in matches.iter().enumerate() {
            for b in &matches[i + 1..] {
                prop_assert!(
                    !a.overlaps(b),
                    "matches [{},{}] and [{},{}] overlap",
                    a.start(), a.end(), b.start(), b.end()
                );
            }
        }

        // Sortedness by (start, token length).
        for pair in matches.windows(2) {
            prop_assert!(pair[0].span_key() <= pair[1].span_key());
        }
    }
}

// =============================================================================
// Supporting properties
// =============================================================================

proptest! {
    /// Entropy is the sum over the cover, brute force included.
    #[test]
    fn entropy_is_additive(password in password_strategy()) {
        let estimate = ESTIMATOR.estimate(&password).unwrap();
        let sum: f64 = estimate.matches().iter().map(Match::entropy).sum();
        let tolerance = 1e-9 * estimate.entropy().max(1.0);
        prop_assert!((estimate.entropy() - sum).abs() <= tolerance);
    }

    /// Estimation is deterministic.
    #[test]
    fn estimation_is_deterministic(password in password_strategy()) {
        let first = ESTIMATOR.estimate(&password).unwrap();
        let second = ESTIMATOR.estimate(&password).unwrap();
        prop_assert_eq!(first.entropy(), second.entropy());
        prop_assert_eq!(first.matches().len(), second.matches().len());
        for (a, b) in first.matches().iter().zip(second.matches()) {
            prop_assert_eq!(a, b);
        }
    }

    /// Entropy never goes negative and grows with pure random length.
    #[test]
    fn entropy_non_negative(password in password_strategy()) {
        let estimate = ESTIMATOR.estimate(&password).unwrap();
        prop_assert!(estimate.entropy() >= 0.0);
        prop_assert!(estimate.matches().iter().all(|m| m.entropy() >= 0.0));
    }

    /// Appending a char never produces an estimate that fails.
    #[test]
    fn extension_is_total(password in password_strategy(), extra in prop::char::range('a', 'z')) {
        let mut extended = password.clone();
        extended.push(extra);
        prop_assert!(ESTIMATOR.estimate(&extended).is_ok());
    }
}
