//! Error types for passgauge.

use thiserror::Error;

/// Result type for passgauge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for passgauge operations.
///
/// Estimation recognizes exactly two failure categories: a pattern matcher
/// signalling an unrecoverable error, and an assembled cover that fails to
/// reconstruct the input password. Everything else (empty input, empty
/// candidate pool, fully random passwords) is handled normally by falling
/// back to brute-force matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A pattern matcher failed while scanning the password.
    #[error("matcher '{matcher}' failed: {message}")]
    Matcher {
        /// Name of the matcher that failed.
        matcher: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The assembled match list does not reconstruct the input password.
    ///
    /// This indicates a bug in the decomposition engine or in a pattern
    /// matcher, never a property of the input.
    #[error("cover does not reconstruct the password: expected {expected:?}, got {actual:?}")]
    InvariantViolation {
        /// The original password.
        expected: String,
        /// What the concatenated match tokens produced.
        actual: String,
    },
}

impl Error {
    /// Create a matcher failure error.
    pub fn matcher(matcher: &'static str, message: impl Into<String>) -> Self {
        Error::Matcher {
            matcher,
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::InvariantViolation {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
