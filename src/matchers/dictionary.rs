//! Dictionary matcher: ranked wordlist lookups over every substring,
//! including reversed spellings and leet-speak decodings.

use crate::config::Configuration;
use crate::matchers::binomial;
use crate::{Match, MatchKind, PatternMatcher, Result};
use std::collections::HashMap;

/// Minimum token length worth a dictionary lookup. Shorter substrings are
/// cheaper to brute-force than their rank would suggest.
const MIN_TOKEN_LEN: usize = 3;

/// Cap on leet decode expansion per substring.
const MAX_LEET_VARIANTS: usize = 64;

/// Ranked dictionary lookup matcher.
///
/// Every substring of length ≥ 3 is lowercased and looked up in each
/// configured dictionary three ways: as written, spelled backwards, and
/// through bounded leet-speak decoding ("p4$$w0rd" resolves to "password").
/// Entropy is the base-2 log of the word's rank plus bonuses for the
/// variations an attacker would have to enumerate.
#[derive(Debug, Clone, Default)]
pub struct DictionaryMatcher;

impl DictionaryMatcher {
    /// Create a new dictionary matcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PatternMatcher for DictionaryMatcher {
    fn find_matches(&self, config: &Configuration, password: &str) -> Result<Vec<Match>> {
        let chars: Vec<char> = password.chars().collect();
        let mut matches = Vec::new();

        for start in 0..chars.len() {
            for end in (start + MIN_TOKEN_LEN - 1)..chars.len() {
                let token: String = chars[start..=end].iter().collect();
                let lower: String = token.chars().flat_map(char::to_lowercase).collect();
                // Case folding can change the char count for a handful of
                // code points; such tokens cannot line up with a wordlist
                // entry of the same span anyway.
                if lower.chars().count() != end - start + 1 {
                    continue;
                }

                for dict in config.dictionaries() {
                    if let Some(rank) = dict.rank(&lower) {
                        let entropy = (rank as f64).log2() + uppercase_bonus(&chars[start..=end]);
                        matches.push(Match::new(
                            MatchKind::Dictionary {
                                word: lower.clone(),
                                rank,
                                reversed: false,
                                leet: false,
                            },
                            start,
                            end,
                            token.clone(),
                            entropy,
                        ));
                    }
                }

                let reversed: String = lower.chars().rev().collect();
                if reversed != lower {
                    for dict in config.dictionaries() {
                        if let Some(rank) = dict.rank(&reversed) {
                            let entropy = (rank as f64).log2()
                                + uppercase_bonus(&chars[start..=end])
                                + 1.0;
                            matches.push(Match::new(
                                MatchKind::Dictionary {
                                    word: reversed.clone(),
                                    rank,
                                    reversed: true,
                                    leet: false,
                                },
                                start,
                                end,
                                token.clone(),
                                entropy,
                            ));
                        }
                    }
                }

                if lower.chars().any(|c| config.leet_table().contains_key(&c)) {
                    for variant in unleet_variants(&lower, config.leet_table(), MAX_LEET_VARIANTS) {
                        if variant == lower {
                            continue;
                        }
                        let substitutions =
                            variant.chars().zip(lower.chars()).filter(|(a, b)| a != b).count();
                        for dict in config.dictionaries() {
                            if let Some(rank) = dict.rank(&variant) {
                                let entropy = (rank as f64).log2()
                                    + uppercase_bonus(&chars[start..=end])
                                    + leet_bonus(end - start + 1, substitutions);
                                matches.push(Match::new(
                                    MatchKind::Dictionary {
                                        word: variant.clone(),
                                        rank,
                                        reversed: false,
                                        leet: true,
                                    },
                                    start,
                                    end,
                                    token.clone(),
                                    entropy,
                                ));
                            }
                        }
                    }
                }
            }
        }

        Ok(matches)
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}

/// Extra bits an attacker needs for the capitalization pattern of the token.
///
/// The common patterns (all lower, first upper, all upper) cost at most one
/// bit; arbitrary mixed case costs the log of the number of ways to place
/// that many capitals.
fn uppercase_bonus(token: &[char]) -> f64 {
    let upper = token.iter().filter(|c| c.is_uppercase()).count();
    if upper == 0 {
        return 0.0;
    }
    let alphabetic = token.iter().filter(|c| c.is_alphabetic()).count();
    let first_only = upper == 1 && token.first().is_some_and(|c| c.is_uppercase());
    let last_only = upper == 1 && token.last().is_some_and(|c| c.is_uppercase());
    if first_only || last_only || upper == alphabetic {
        return 1.0;
    }
    let lower = alphabetic - upper;
    let mut possibilities = 0.0;
    for i in 1..=upper.min(lower) {
        possibilities += binomial(alphabetic, i);
    }
    possibilities.log2().max(1.0)
}

/// Extra bits for the leet substitutions used in the token.
fn leet_bonus(len: usize, substitutions: usize) -> f64 {
    if substitutions == 0 {
        return 0.0;
    }
    let unsubstituted = len - substitutions;
    if unsubstituted == 0 {
        return 1.0;
    }
    let mut possibilities = 0.0;
    for i in 1..=substitutions.min(unsubstituted) {
        possibilities += binomial(len, i);
    }
    possibilities.log2().max(1.0)
}

/// All decodings of `lower` through the substitution table, the identity
/// decoding included, capped at `cap` variants.
fn unleet_variants(lower: &str, table: &HashMap<char, Vec<char>>, cap: usize) -> Vec<String> {
    let mut variants = vec![String::with_capacity(lower.len())];
    for ch in lower.chars() {
        let subs = table.get(&ch).map(Vec::as_slice).unwrap_or(&[]);
        if subs.is_empty() || variants.len() * (subs.len() + 1) > cap {
            for v in &mut variants {
                v.push(ch);
            }
        } else {
            let mut next = Vec::with_capacity(variants.len() * (subs.len() + 1));
            for v in &variants {
                let mut keep = v.clone();
                keep.push(ch);
                next.push(keep);
                for &s in subs {
                    let mut decoded = v.clone();
                    decoded.push(s);
                    next.push(decoded);
                }
            }
            variants = next;
        }
    }
    variants
}
