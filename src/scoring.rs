//! Estimate results and entropy/guess conversions.

use crate::config::Configuration;
use crate::matches::{Match, MatchSliceExt};
use crate::{Error, Result};
use serde::Serialize;

/// The result of estimating one password.
///
/// Carries the input verbatim, the chosen cover sorted by start index, and
/// the total entropy: the sum of every match's entropy, brute-force fillers
/// included.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    password: String,
    matches: Vec<Match>,
    entropy: f64,
}

impl Estimate {
    /// Assemble an estimate from a finished cover.
    ///
    /// The cover must already be sorted; its concatenated tokens must
    /// reproduce the password exactly or assembly fails with
    /// [`Error::InvariantViolation`].
    pub(crate) fn assemble(password: &str, matches: Vec<Match>) -> Result<Self> {
        let reconstructed: String = matches.iter().map(Match::token).collect();
        if reconstructed != password {
            return Err(Error::invariant(password, reconstructed));
        }
        let entropy = matches.entropy_sum();
        Ok(Self {
            password: password.to_string(),
            matches,
            entropy,
        })
    }

    /// The password this estimate describes.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The chosen cover, sorted by start index.
    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Total entropy in bits.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Number of guesses the entropy corresponds to.
    #[must_use]
    pub fn guesses(&self) -> f64 {
        guesses_from_entropy(self.entropy)
    }

    /// Seconds to exhaust the guess space at a fixed rate.
    #[must_use]
    pub fn crack_seconds(&self, guesses_per_second: f64) -> f64 {
        self.guesses() / guesses_per_second
    }

    /// Crack-time rows for every attack scenario in the configuration,
    /// fastest attack first.
    #[must_use]
    pub fn crack_times(&self, config: &Configuration) -> Vec<(String, String)> {
        let mut rows: Vec<(String, f64)> = config
            .guess_types()
            .iter()
            .map(|(name, &rate)| (name.clone(), rate))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        rows.into_iter()
            .map(|(name, rate)| {
                let formatted = format_duration(self.crack_seconds(rate));
                (name, formatted)
            })
            .collect()
    }
}

/// Bits of entropy a guess count corresponds to.
///
/// Saturates: a non-finite input or intermediate becomes the maximum finite
/// double rather than an error.
#[must_use]
pub fn entropy_from_guesses(guesses: f64) -> f64 {
    let guesses = if guesses.is_finite() { guesses } else { f64::MAX };
    let entropy = guesses.log2();
    if entropy.is_finite() {
        entropy
    } else {
        f64::MAX
    }
}

/// Guess count an entropy corresponds to, rounded half-up to a whole number
/// of guesses.
///
/// Saturates at the maximum finite double instead of overflowing to
/// infinity.
#[must_use]
pub fn guesses_from_entropy(entropy: f64) -> f64 {
    let guesses = 2f64.powf(entropy);
    if guesses.is_finite() {
        guesses.round()
    } else {
        f64::MAX
    }
}

/// Human-readable duration for crack-time reporting.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.44 * DAY;
    const YEAR: f64 = 365.25 * DAY;
    const CENTURY: f64 = 100.0 * YEAR;

    if !seconds.is_finite() || seconds >= CENTURY {
        return "centuries".to_string();
    }
    if seconds < 1.0 {
        return "instant".to_string();
    }
    let (value, unit) = if seconds < MINUTE {
        (seconds, "second")
    } else if seconds < HOUR {
        (seconds / MINUTE, "minute")
    } else if seconds < DAY {
        (seconds / HOUR, "hour")
    } else if seconds < MONTH {
        (seconds / DAY, "day")
    } else if seconds < YEAR {
        (seconds / MONTH, "month")
    } else {
        (seconds / YEAR, "year")
    };
    let rounded = value.round().max(1.0) as u64;
    if rounded == 1 {
        format!("1 {unit}")
    } else {
        format!("{rounded} {unit}s")
    }
}
