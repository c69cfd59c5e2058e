//! # passgauge
//!
//! Password-strength estimation for Rust: decompose a password into
//! recognizable patterns and price each one in bits of entropy.
//!
//! An estimate is a *cover*: a list of non-overlapping matches whose
//! concatenated tokens reconstruct the password exactly. Each match is a
//! recognized pattern (dictionary word, keyboard walk, repeat, sequence,
//! date) or a single-character brute-force fallback, and the password's
//! total entropy is the sum over the cover.
//!
//! ## Quick Start
//!
//! ```rust
//! use passgauge::Estimator;
//!
//! let estimator = Estimator::default();
//! let estimate = estimator.estimate("correcthorse1987").unwrap();
//!
//! println!("{:.1} bits", estimate.entropy());
//! for m in estimate.matches() {
//!     println!("  {:?} [{}..={}] {}", m.kind(), m.start(), m.end(), m.token());
//! }
//! ```
//!
//! ## How an estimate works
//!
//! 1. Every configured [`PatternMatcher`] scans the whole password and
//!    proposes candidate matches, overlaps and all.
//! 2. Candidates dominated at the same span by a cheaper candidate are
//!    pruned.
//! 3. A cheap greedy cover classifies the password as random or structured;
//!    random passwords are covered entirely by brute-force matches without
//!    further work.
//! 4. For structured passwords, an exhaustive search enumerates every
//!    maximal chain of non-intersecting candidates and keeps the cover that
//!    explains the most characters with recognized patterns, preferring the
//!    lowest average entropy among equally-complete covers.
//! 5. Gaps are backfilled with brute-force matches and the cover is
//!    verified to reconstruct the password exactly.
//!
//! ## Built-in Matchers
//!
//! | Matcher | Recognizes |
//! |---------|------------|
//! | [`matchers::DictionaryMatcher`] | ranked wordlists, reversed, leet |
//! | [`matchers::SpatialMatcher`] | keyboard walks (QWERTY, keypad) |
//! | [`matchers::RepeatMatcher`] | repeated chars and blocks |
//! | [`matchers::SequenceMatcher`] | consecutive code-point runs |
//! | [`matchers::DateMatcher`] | numeric dates and years |
//!
//! Custom matchers implement [`PatternMatcher`] and slot into a
//! [`Configuration`] via [`ConfigurationBuilder::matchers`].
//!
//! ## Scope
//!
//! The estimator neither hashes nor stores anything; it holds no state
//! between calls. Entropy estimates price *patterns*, not policies: a
//! password that passes a composition rule can still fall to a few thousand
//! guesses, and that is exactly what the estimate reveals.

pub mod config;
mod error;
mod estimator;
pub mod feedback;
pub mod matchers;
mod matches;
mod scoring;

pub use config::{Configuration, ConfigurationBuilder, Dictionary};
pub use error::{Error, Result};
pub use estimator::Estimator;
pub use feedback::Feedback;
pub use matches::{Match, MatchKind, MatchSliceExt};
pub use scoring::{entropy_from_guesses, format_duration, guesses_from_entropy, Estimate};

/// A pattern matcher: proposes candidate matches for a password.
///
/// Matchers must be deterministic for a given (configuration, password)
/// pair, must not mutate the configuration, and may return any number of
/// matches in any order, overlapping ones included. The engine treats each
/// matcher's output as authoritative for its pattern kind; a matcher error
/// aborts the whole estimate.
///
/// Spans are char indices into the password and every returned match's
/// token must be the exact substring it claims, or the final cover will
/// fail reconstruction.
pub trait PatternMatcher: Send + Sync {
    /// Scan the password and return all candidate matches.
    fn find_matches(&self, config: &Configuration, password: &str) -> Result<Vec<Match>>;

    /// Matcher name, used in error reports.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// A mock pattern matcher for testing.
///
/// Returns a fixed set of matches, optionally validating that their spans
/// and tokens line up with the scanned password, or fails with a canned
/// error to exercise error paths.
///
/// # Example
///
/// ```rust
/// use passgauge::{ConfigurationBuilder, Estimator, Match, MatchKind, MockMatcher};
///
/// let mock = MockMatcher::new("fixed").with_matches(vec![
///     Match::new(MatchKind::Year, 0, 3, "1999", 7.0),
/// ]);
/// let config = ConfigurationBuilder::default()
///     .matchers(vec![Box::new(mock)])
///     .build();
/// let estimate = Estimator::new(config).estimate("1999").unwrap();
/// assert_eq!(estimate.matches().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockMatcher {
    name: &'static str,
    matches: Vec<Match>,
    error: Option<String>,
    validate: bool,
}

impl MockMatcher {
    /// Create a mock matcher that returns no matches.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            matches: Vec::new(),
            error: None,
            validate: true,
        }
    }

    /// Set the matches to return.
    #[must_use]
    pub fn with_matches(mut self, matches: Vec<Match>) -> Self {
        self.matches = matches;
        self
    }

    /// Make every scan fail with the given message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Disable span/token validation (for testing engine error paths).
    #[must_use]
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }
}

impl PatternMatcher for MockMatcher {
    fn find_matches(&self, _config: &Configuration, password: &str) -> Result<Vec<Match>> {
        if let Some(message) = &self.error {
            return Err(Error::matcher(self.name, message.clone()));
        }
        if self.validate {
            let chars: Vec<char> = password.chars().collect();
            for m in &self.matches {
                if m.end() >= chars.len() {
                    return Err(Error::matcher(
                        self.name,
                        format!(
                            "match [{}, {}] out of bounds for a {}-char password",
                            m.start(),
                            m.end(),
                            chars.len()
                        ),
                    ));
                }
                let actual: String = chars[m.start()..=m.end()].iter().collect();
                if actual != m.token() {
                    return Err(Error::matcher(
                        self.name,
                        format!("token {:?} does not match password slice {actual:?}", m.token()),
                    ));
                }
            }
        }
        Ok(self.matches.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use passgauge::prelude::*;
    //!
    //! let estimate = Estimator::default().estimate("hunter2").unwrap();
    //! assert!(estimate.entropy() >= 0.0);
    //! ```

    pub use crate::{
        Configuration, ConfigurationBuilder, Estimate, Estimator, Match, MatchKind,
        MatchSliceExt, PatternMatcher,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_matcher_validates_tokens() {
        let mock = MockMatcher::new("m").with_matches(vec![Match::new(
            MatchKind::Year,
            0,
            3,
            "1999",
            7.0,
        )]);
        let config = ConfigurationBuilder::default().matchers(vec![]).build();
        assert!(mock.find_matches(&config, "1999").is_ok());
        assert!(mock.find_matches(&config, "2000").is_err());
        assert!(mock.find_matches(&config, "19").is_err());
    }

    #[test]
    fn mock_matcher_skips_validation_when_disabled() {
        let mock = MockMatcher::new("m")
            .with_matches(vec![Match::new(MatchKind::Year, 0, 3, "1999", 7.0)])
            .without_validation();
        let config = ConfigurationBuilder::default().matchers(vec![]).build();
        assert!(mock.find_matches(&config, "xx").is_ok());
    }

    #[test]
    fn default_matcher_name() {
        struct Bare;
        impl PatternMatcher for Bare {
            fn find_matches(&self, _: &Configuration, _: &str) -> Result<Vec<Match>> {
                Ok(Vec::new())
            }
        }
        assert_eq!(Bare.name(), "unknown");
    }
}
