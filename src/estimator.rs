//! The decomposition engine.
//!
//! Given the candidate matches the configured pattern matchers produce, the
//! engine selects a concrete cover of the password: a list of non-overlapping
//! matches whose concatenated tokens reconstruct the input exactly, chosen to
//! attribute as much of the password as possible to recognized patterns and,
//! among equally-covering decompositions, to cost the fewest bits.
//!
//! The pipeline:
//!
//! 1. gather candidates from every matcher, in configuration order;
//! 2. prune candidates dominated at the same coordinates by a cheaper one;
//! 3. build the single-character brute-force fallback table;
//! 4. run a cheap greedy cover to decide whether the password is essentially
//!    random — if so, skip the search and return all brute force;
//! 5. otherwise enumerate every maximal chain of non-intersecting candidates
//!    and keep the best under the longest-then-cheapest rule;
//! 6. backfill uncovered positions with brute-force matches.

use crate::config::Configuration;
use crate::matchers::data::charset_cardinality;
use crate::matches::{Match, MatchKind, MatchSliceExt};
use crate::scoring::Estimate;
use crate::Result;

/// Password strength estimator.
///
/// Holds a [`Configuration`] and runs the decomposition engine over it. An
/// estimator is cheap to reuse; configure once and call
/// [`estimate`](Estimator::estimate) per password. Estimation borrows the
/// configuration for the whole call, so the configuration cannot change
/// mid-estimate.
///
/// # Example
///
/// ```rust
/// use passgauge::Estimator;
///
/// let estimator = Estimator::default();
/// let estimate = estimator.estimate("password1").unwrap();
/// assert_eq!(estimate.matches().len(), 2); // "password" + brute-force "1"
/// ```
#[derive(Debug)]
pub struct Estimator {
    config: Configuration,
}

impl Estimator {
    /// Create an estimator with the given configuration.
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Replace the configuration used by subsequent estimates.
    pub fn set_configuration(&mut self, config: Configuration) {
        self.config = config;
    }

    /// Estimate the strength of a password.
    ///
    /// Returns the chosen decomposition and its total entropy. Fails only if
    /// a pattern matcher fails, or if the assembled cover does not
    /// reconstruct the password (which indicates a bug, not bad input).
    pub fn estimate(&self, password: &str) -> Result<Estimate> {
        let cover = best_combination(&self.config, password)?;
        Estimate::assemble(password, cover)
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

// =============================================================================
// Candidate gathering and pruning
// =============================================================================

/// Run every configured matcher and concatenate their candidates.
///
/// No filtering, deduplication, or ordering happens here; a matcher error
/// aborts the whole estimate.
fn gather_candidates(config: &Configuration, password: &str) -> Result<Vec<Match>> {
    let mut pool = Vec::new();
    for matcher in config.matchers() {
        pool.extend(matcher.find_matches(config, password)?);
    }
    Ok(pool)
}

/// Drop every candidate strictly dominated by another candidate with the
/// same coordinates and a lower average entropy per char.
///
/// Candidates tied on average entropy all survive; domination must be
/// strict.
fn keep_lowest_matches(pool: &mut Vec<Match>) {
    let dominated: Vec<bool> = pool
        .iter()
        .map(|m| {
            pool.iter().any(|other| {
                m.start() == other.start()
                    && m.end() == other.end()
                    && m.average_entropy() > other.average_entropy()
            })
        })
        .collect();
    let mut flags = dominated.iter();
    pool.retain(|_| !flags.next().expect("flag per element"));
}

/// One brute-force match per char index.
fn brute_force_table(chars: &[char]) -> Vec<Match> {
    chars
        .iter()
        .enumerate()
        .map(|(index, &ch)| {
            Match::new(
                MatchKind::BruteForce,
                index,
                index,
                ch.to_string(),
                f64::from(charset_cardinality(ch)).log2(),
            )
        })
        .collect()
}

// =============================================================================
// Cheap cover and the randomness gate
// =============================================================================

/// Assemble a plausible cover in one forward pass and one backward pass.
///
/// For each index the cheapest candidate ending there is retained; the
/// backward pass then chains those picks, filling holes with brute force.
/// The result feeds [`is_random`] and nothing else; it is not necessarily
/// optimal.
fn good_enough_cover(len: usize, pool: &[Match], brute: &[Match]) -> Vec<Match> {
    let mut best_ending_at: Vec<Option<&Match>> = vec![None; len];
    for m in pool {
        let slot = &mut best_ending_at[m.end()];
        if slot.map_or(true, |current| m.average_entropy() < current.average_entropy()) {
            *slot = Some(m);
        }
    }

    let mut cover: Vec<Match> = Vec::new();
    let mut k = len;
    while k > 0 {
        let index = k - 1;
        match best_ending_at[index] {
            Some(m) => {
                cover.push(m.clone());
                k = m.start();
            }
            None => {
                cover.push(brute[index].clone());
                k = index;
            }
        }
    }
    cover.reverse();
    cover
}

/// Classify a password as essentially random from its cheap cover.
///
/// Random means the recognized matches cover less than half the password,
/// or less than 80% of it with no single recognized run spanning a quarter.
/// The thresholds are fixed; structured passwords are the rare case and the
/// exhaustive search is only worth running for them.
fn is_random(len: usize, cover: &[Match]) -> bool {
    let matched = cover.pattern_len() as f64;
    let longest = cover.longest_pattern() as f64;
    let len = len as f64;
    matched < len * 0.5 || (matched < len * 0.8 && len * 0.25 > longest)
}

// =============================================================================
// Exhaustive cover search
// =============================================================================

/// Enumerate every maximal chain of non-intersecting candidates and return
/// the best full cover.
///
/// `pool` must already be sorted by [`Match::span_key`]. Each candidate gets
/// a thinned forward-adjacency list: the candidates that start after it ends,
/// minus any that are already reachable through an earlier retained
/// successor. Chains start from seeds (candidates no other candidate leads
/// to) and fork on every viable successor; each leaf is a maximal chain,
/// backfilled and judged by the longest-then-cheapest rule.
fn best_cover(len: usize, pool: &[Match], brute: &[Match]) -> Vec<Match> {
    let successors: Vec<Vec<usize>> = (0..pool.len())
        .map(|i| {
            let mut succ: Vec<usize> = Vec::new();
            for n in (i + 1)..pool.len() {
                if pool[n].start() > pool[i].end()
                    && !succ.iter().any(|&p| pool[n].start() > pool[p].end())
                {
                    succ.push(n);
                }
            }
            // Scanning a sorted pool forward yields successors already in
            // span-key order.
            succ
        })
        .collect();

    let mut reachable = vec![false; pool.len()];
    for succ in &successors {
        for &n in succ {
            reachable[n] = true;
        }
    }

    let mut best: Vec<Match> = Vec::new();
    let mut chain: Vec<usize> = Vec::new();
    for seed in (0..pool.len()).filter(|&i| !reachable[i]) {
        extend_chain(seed, len, pool, &successors, brute, &mut chain, &mut best);
    }

    best.sort_by_key(Match::span_key);
    best
}

/// Grow the current chain by one candidate, recursing on every successor
/// that intersects nothing already chained. A call that cannot extend is a
/// leaf: the finished chain competes against the best cover so far.
fn extend_chain(
    index: usize,
    len: usize,
    pool: &[Match],
    successors: &[Vec<usize>],
    brute: &[Match],
    chain: &mut Vec<usize>,
    best: &mut Vec<Match>,
) {
    chain.push(index);

    let mut extended = false;
    for &next in &successors[index] {
        if chain.iter().any(|&c| pool[c].overlaps(&pool[next])) {
            continue;
        }
        extend_chain(next, len, pool, successors, brute, chain, best);
        extended = true;
    }

    if !extended {
        let chain_len: usize = chain
            .iter()
            .map(|&c| &pool[c])
            .filter(|m| !m.is_brute_force())
            .map(|m| m.len())
            .sum();
        let chain_entropy: f64 = chain
            .iter()
            .map(|&c| &pool[c])
            .filter(|m| !m.is_brute_force())
            .map(Match::entropy)
            .sum();
        let best_len = best.pattern_len();

        // The most complete cover wins; average entropy only breaks ties
        // among covers at least as complete as the incumbent.
        let wins = best.is_empty()
            || (chain_len >= best_len
                && chain_entropy / (chain_len as f64)
                    < best.pattern_entropy() / (best_len as f64));
        if wins {
            let mut cover: Vec<Match> = chain.iter().map(|&c| pool[c].clone()).collect();
            backfill_brute_force(len, brute, &mut cover);
            *best = cover;
        }
    }

    chain.pop();
}

// =============================================================================
// Backfill and top-level selection
// =============================================================================

/// Add one brute-force match for every index no match in `cover` claims.
fn backfill_brute_force(len: usize, brute: &[Match], cover: &mut Vec<Match>) {
    for index in 0..len {
        let covered = cover
            .iter()
            .any(|m| index >= m.start() && index <= m.end());
        if !covered {
            cover.push(brute[index].clone());
        }
    }
}

/// Produce the final sorted cover for a password.
fn best_combination(config: &Configuration, password: &str) -> Result<Vec<Match>> {
    let chars: Vec<char> = password.chars().collect();
    let mut pool = gather_candidates(config, password)?;
    keep_lowest_matches(&mut pool);
    let brute = brute_force_table(&chars);

    if pool.is_empty() || is_random(chars.len(), &good_enough_cover(chars.len(), &pool, &brute)) {
        let mut cover = Vec::new();
        backfill_brute_force(chars.len(), &brute, &mut cover);
        cover.sort_by_key(Match::span_key);
        return Ok(cover);
    }

    pool.sort_by_key(Match::span_key);
    Ok(best_cover(chars.len(), &pool, &brute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigurationBuilder, MockMatcher};

    fn m(start: usize, end: usize, entropy: f64) -> Match {
        Match::new(
            MatchKind::Sequence { ascending: true },
            start,
            end,
            "x".repeat(end - start + 1),
            entropy,
        )
    }

    /// A mock match whose token is the real slice of `password`, so covers
    /// built from it survive the assembler's reconstruction check.
    fn m_on(password: &str, start: usize, end: usize, entropy: f64) -> Match {
        let token: String = password.chars().skip(start).take(end - start + 1).collect();
        Match::new(MatchKind::Sequence { ascending: true }, start, end, token, entropy)
    }

    #[test]
    fn pruner_keeps_strictly_cheapest_per_span() {
        let mut pool = vec![m(0, 3, 8.0), m(0, 3, 4.0), m(4, 5, 2.0)];
        keep_lowest_matches(&mut pool);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().any(|x| x.entropy() == 4.0));
        assert!(pool.iter().any(|x| x.entropy() == 2.0));
    }

    #[test]
    fn pruner_keeps_all_tied_candidates() {
        let mut pool = vec![m(0, 3, 4.0), m(0, 3, 4.0)];
        keep_lowest_matches(&mut pool);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn pruner_ignores_different_spans() {
        let mut pool = vec![m(0, 3, 8.0), m(0, 4, 1.0)];
        keep_lowest_matches(&mut pool);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn brute_force_table_covers_every_index() {
        let chars: Vec<char> = "ab1#é".chars().collect();
        let table = brute_force_table(&chars);
        assert_eq!(table.len(), 5);
        for (i, bf) in table.iter().enumerate() {
            assert_eq!((bf.start(), bf.end()), (i, i));
            assert!(bf.is_brute_force());
        }
        assert!(table[2].entropy() < table[0].entropy()); // digit < letter
    }

    #[test]
    fn cheap_cover_prefers_cheapest_ending() {
        let brute = brute_force_table(&"abcdef".chars().collect::<Vec<_>>());
        let pool = vec![m(0, 2, 9.0), m(3, 5, 3.0), m(0, 5, 30.0)];
        let cover = good_enough_cover(6, &pool, &brute);
        // Ends at 5: the [3,5] match (avg 1.0) beats [0,5] (avg 5.0); then
        // [0,2] chains in.
        assert_eq!(cover.len(), 2);
        assert_eq!((cover[0].start(), cover[0].end()), (0, 2));
        assert_eq!((cover[1].start(), cover[1].end()), (3, 5));
    }

    #[test]
    fn cheap_cover_backfills_holes() {
        let brute = brute_force_table(&"abcdef".chars().collect::<Vec<_>>());
        let pool = vec![m(1, 3, 3.0)];
        let cover = good_enough_cover(6, &pool, &brute);
        let spans: Vec<(usize, usize)> = cover.iter().map(|c| (c.start(), c.end())).collect();
        assert_eq!(spans, [(0, 0), (1, 3), (4, 4), (5, 5)]);
    }

    #[test]
    fn randomness_gate_thresholds() {
        let cover = |spans: &[(usize, usize)]| -> Vec<Match> {
            spans.iter().map(|&(s, e)| m(s, e, 1.0)).collect()
        };
        // 4 of 10 matched: below half.
        assert!(is_random(10, &cover(&[(0, 3)])));
        // 5 of 10 matched, longest 5 >= 2.5: structured.
        assert!(!is_random(10, &cover(&[(0, 4)])));
        // 6 of 10 matched via three short runs, longest 2 < 2.5: random.
        assert!(is_random(10, &cover(&[(0, 1), (3, 4), (6, 7)])));
        // 8 of 10 matched: structured regardless of run length.
        assert!(!is_random(10, &cover(&[(0, 1), (2, 3), (4, 5), (6, 7)])));
    }

    #[test]
    fn successor_lists_are_thinned() {
        // Three chainable matches: the third is reachable through the
        // second, so it must not appear among the first's successors.
        let pool = vec![m(0, 1, 1.0), m(2, 3, 1.0), m(4, 5, 1.0)];
        let brute = brute_force_table(&"abcdef".chars().collect::<Vec<_>>());
        let cover = best_cover(6, &pool, &brute);
        assert_eq!(cover.len(), 3);
        assert!(cover.iter().all(|c| !c.is_brute_force()));
    }

    #[test]
    fn backfill_adds_only_missing_indices() {
        let brute = brute_force_table(&"abcde".chars().collect::<Vec<_>>());
        let mut cover = vec![m(1, 2, 1.0)];
        backfill_brute_force(5, &brute, &mut cover);
        cover.sort_by_key(Match::span_key);
        let spans: Vec<(usize, usize)> = cover.iter().map(|c| (c.start(), c.end())).collect();
        assert_eq!(spans, [(0, 0), (1, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn search_prefers_complete_cheap_cover() {
        // Two half-covers at 0.5 bits/char vs one full cover at 1.25: the
        // pair is found first and the full cover cannot beat its average.
        let config = ConfigurationBuilder::default()
            .matchers(vec![Box::new(MockMatcher::new("mock").with_matches(vec![
                m_on("abcdabcd", 0, 3, 2.0),
                m_on("abcdabcd", 4, 7, 2.0),
                m_on("abcdabcd", 0, 7, 10.0),
            ]))])
            .build();
        let estimate = Estimator::new(config).estimate("abcdabcd").unwrap();
        let spans: Vec<(usize, usize)> =
            estimate.matches().iter().map(|c| (c.start(), c.end())).collect();
        assert_eq!(spans, [(0, 3), (4, 7)]);
        assert!((estimate.entropy() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn search_takes_longer_cover_when_cheaper_per_char() {
        let config = ConfigurationBuilder::default()
            .matchers(vec![Box::new(MockMatcher::new("mock").with_matches(vec![
                m_on("abcdabcd", 0, 3, 8.0),
                m_on("abcdabcd", 0, 7, 8.0),
            ]))])
            .build();
        let estimate = Estimator::new(config).estimate("abcdabcd").unwrap();
        let spans: Vec<(usize, usize)> =
            estimate.matches().iter().map(|c| (c.start(), c.end())).collect();
        assert_eq!(spans, [(0, 7)]);
    }

    #[test]
    fn gate_forces_brute_force_for_sparse_matches() {
        let config = ConfigurationBuilder::default()
            .matchers(vec![Box::new(
                MockMatcher::new("mock").with_matches(vec![m_on("abcdefghij", 0, 2, 1.0)]),
            )])
            .build();
        let estimate = Estimator::new(config).estimate("abcdefghij").unwrap();
        assert_eq!(estimate.matches().len(), 10);
        assert!(estimate.matches().iter().all(Match::is_brute_force));
    }

    #[test]
    fn matcher_errors_propagate() {
        let config = ConfigurationBuilder::default()
            .matchers(vec![Box::new(MockMatcher::new("boom").with_error("bad state"))])
            .build();
        let result = Estimator::new(config).estimate("anything");
        assert!(matches!(result, Err(crate::Error::Matcher { matcher: "boom", .. })));
    }

    #[test]
    fn configuration_swap_changes_results() {
        let mut estimator = Estimator::new(
            ConfigurationBuilder::default().matchers(vec![]).build(),
        );
        let before = estimator.estimate("password").unwrap();
        assert!(before.matches().iter().all(Match::is_brute_force));

        estimator.set_configuration(ConfigurationBuilder::default().build());
        let after = estimator.estimate("password").unwrap();
        assert_eq!(after.matches().len(), 1);
        assert!(!after.matches()[0].is_brute_force());
    }
}
