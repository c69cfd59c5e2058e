//! Match types produced by pattern matchers and consumed by the estimator.

use serde::Serialize;

/// Pattern kind discriminator for a [`Match`].
///
/// Each variant carries the per-kind payload a human-readable report needs;
/// the decomposition engine itself only ever inspects the brute-force tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    /// A ranked dictionary hit, possibly reversed or leet-decoded.
    Dictionary {
        /// The dictionary word the token resolved to (lowercase).
        word: String,
        /// 1-based rank of the word in its dictionary.
        rank: usize,
        /// The token matched the word spelled backwards.
        reversed: bool,
        /// The token required leet-speak decoding to match.
        leet: bool,
    },
    /// A repeated character run or an adjacent repeated block.
    Repeat {
        /// The repeated unit.
        base: String,
        /// How many times the unit occurs in the token.
        repetitions: usize,
    },
    /// A run of consecutive code points ("abcd", "9876").
    Sequence {
        /// Whether the run ascends.
        ascending: bool,
    },
    /// A walk over physically adjacent keys.
    Spatial {
        /// Name of the keyboard layout the walk was found on.
        layout: &'static str,
        /// Number of direction changes in the walk.
        turns: usize,
        /// Number of shifted keys in the walk.
        shifted: usize,
    },
    /// A calendar date, with or without separators.
    Date {
        /// Day component, if the shape distinguishes one.
        day: u32,
        /// Month component.
        month: u32,
        /// Four-digit year.
        year: i32,
        /// Separator character, if any.
        separator: Option<char>,
    },
    /// A standalone four-digit year.
    Year,
    /// A single-character fallback covering a position no matcher claimed.
    BruteForce,
}

/// A contiguous substring of the password together with a recognized pattern
/// kind and an entropy estimate in bits.
///
/// Spans are **char indices** into the password, with `end` inclusive, so a
/// match always satisfies `len() == end - start + 1 == token.chars().count()`.
/// Entropy is computed by the producing matcher at construction and is
/// opaque to the decomposition engine.
///
/// # Example
///
/// ```rust
/// use passgauge::{Match, MatchKind};
///
/// let m = Match::new(MatchKind::Year, 0, 3, "1987", 7.0);
/// assert_eq!(m.len(), 4);
/// assert!((m.average_entropy() - 1.75).abs() < 1e-12);
/// assert!(!m.is_brute_force());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    #[serde(flatten)]
    kind: MatchKind,
    start: usize,
    end: usize,
    token: String,
    entropy: f64,
}

#[allow(clippy::len_without_is_empty)]
impl Match {
    /// Create a new match.
    ///
    /// Negative or non-finite entropy is clamped to zero; a match can never
    /// make a password cheaper than free.
    #[must_use]
    pub fn new(kind: MatchKind, start: usize, end: usize, token: impl Into<String>, entropy: f64) -> Self {
        let token = token.into();
        debug_assert!(start <= end, "match start {start} must be <= end {end}");
        debug_assert_eq!(
            token.chars().count(),
            end - start + 1,
            "token {token:?} length inconsistent with span [{start}, {end}]"
        );
        Self {
            kind,
            start,
            end,
            token,
            entropy: if entropy.is_finite() { entropy.max(0.0) } else { 0.0 },
        }
    }

    /// Pattern kind of this match.
    #[must_use]
    pub fn kind(&self) -> &MatchKind {
        &self.kind
    }

    /// First covered char index.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last covered char index (inclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of chars covered. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// The covered substring of the password.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Estimated information content of the token, in bits.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Entropy per covered char, the per-position cost used for pruning and
    /// cover selection.
    #[must_use]
    pub fn average_entropy(&self) -> f64 {
        self.entropy / self.len() as f64
    }

    /// Whether this is a single-character brute-force fallback.
    #[must_use]
    pub fn is_brute_force(&self) -> bool {
        matches!(self.kind, MatchKind::BruteForce)
    }

    /// Check whether this match claims any char index the other match claims.
    #[must_use]
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Sort key ordering matches by start index, then token length.
    ///
    /// Two distinct matches can share both keys; callers rely on Rust's
    /// stable sort to keep their relative order defined.
    #[must_use]
    pub fn span_key(&self) -> (usize, usize) {
        (self.start, self.len())
    }
}

/// Extension methods over slices of matches.
///
/// The decomposition engine repeatedly aggregates length and entropy over
/// partial covers, usually excluding brute-force fillers.
pub trait MatchSliceExt {
    /// Summed length of non-brute-force matches.
    fn pattern_len(&self) -> usize;

    /// Longest single non-brute-force match, or 0.
    fn longest_pattern(&self) -> usize;

    /// Summed entropy of non-brute-force matches.
    fn pattern_entropy(&self) -> f64;

    /// Summed entropy of all matches, brute-force included.
    fn entropy_sum(&self) -> f64;
}

impl MatchSliceExt for [Match] {
    fn pattern_len(&self) -> usize {
        self.iter()
            .filter(|m| !m.is_brute_force())
            .map(Match::len)
            .sum()
    }

    fn longest_pattern(&self) -> usize {
        self.iter()
            .filter(|m| !m.is_brute_force())
            .map(Match::len)
            .max()
            .unwrap_or(0)
    }

    fn pattern_entropy(&self) -> f64 {
        self.iter()
            .filter(|m| !m.is_brute_force())
            .map(Match::entropy)
            .sum()
    }

    fn entropy_sum(&self) -> f64 {
        self.iter().map(Match::entropy).sum()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            s1 in 0usize..100,
            len1 in 1usize..20,
            s2 in 0usize..100,
            len2 in 1usize..20,
        ) {
            let a = Match::new(MatchKind::BruteForce, s1, s1 + len1 - 1, "x".repeat(len1), 1.0);
            let b = Match::new(MatchKind::BruteForce, s2, s2 + len2 - 1, "y".repeat(len2), 1.0);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn average_entropy_scales(len in 1usize..30, entropy in 0.0f64..200.0) {
            let m = Match::new(MatchKind::BruteForce, 0, len - 1, "z".repeat(len), entropy);
            prop_assert!((m.average_entropy() * len as f64 - m.entropy()).abs() < 1e-9);
        }

        #[test]
        fn entropy_never_negative(entropy in -100.0f64..100.0) {
            let m = Match::new(MatchKind::Year, 0, 3, "1987", entropy);
            prop_assert!(m.entropy() >= 0.0);
        }
    }
}
