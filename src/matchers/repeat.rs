//! Repeat matcher: repeated characters and repeated blocks.

use crate::config::Configuration;
use crate::matchers::data::charset_cardinality;
use crate::{Match, MatchKind, PatternMatcher, Result};

/// Minimum repetitions for a single-character run.
const MIN_CHAR_REPS: usize = 3;

/// Repetition matcher.
///
/// Scans greedily for the shortest base that immediately repeats, emitting
/// one match over the whole repeated region: "aaaa" is `a` × 4,
/// "xyzxyzxyz" is `xyz` × 3. Single characters need three repetitions to
/// count; longer bases need two. A repeat costs the brute-force price of
/// its base plus the number of replays, which is what an attacker who spots
/// the repetition actually pays.
#[derive(Debug, Clone, Default)]
pub struct RepeatMatcher;

impl RepeatMatcher {
    /// Create a new repeat matcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PatternMatcher for RepeatMatcher {
    fn find_matches(&self, _config: &Configuration, password: &str) -> Result<Vec<Match>> {
        let chars: Vec<char> = password.chars().collect();
        let mut matches = Vec::new();

        let mut i = 0;
        while i < chars.len() {
            let mut advanced = false;
            for base_len in 1..=(chars.len() - i) / 2 {
                let base = &chars[i..i + base_len];
                let mut reps = 1;
                while i + (reps + 1) * base_len <= chars.len()
                    && chars[i + reps * base_len..i + (reps + 1) * base_len] == *base
                {
                    reps += 1;
                }
                let enough = if base_len == 1 { reps >= MIN_CHAR_REPS } else { reps >= 2 };
                if enough {
                    let end = i + reps * base_len - 1;
                    let token: String = chars[i..=end].iter().collect();
                    matches.push(Match::new(
                        MatchKind::Repeat {
                            base: base.iter().collect(),
                            repetitions: reps,
                        },
                        i,
                        end,
                        token,
                        repeat_entropy(base, reps),
                    ));
                    i = end + 1;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                i += 1;
            }
        }

        Ok(matches)
    }

    fn name(&self) -> &'static str {
        "repeat"
    }
}

/// Brute-force cost of the base plus the choice to replay it.
fn repeat_entropy(base: &[char], reps: usize) -> f64 {
    let base_bits: f64 = base
        .iter()
        .map(|&ch| f64::from(charset_cardinality(ch)).log2())
        .sum();
    base_bits + (reps as f64).log2()
}
