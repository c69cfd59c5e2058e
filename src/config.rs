//! Estimator configuration: matcher set, dictionaries, substitution tables,
//! and reporting parameters.

use crate::matchers::{self, data};
use crate::PatternMatcher;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A ranked wordlist: word (lowercase) to 1-based rank, most common first.
#[derive(Debug, Clone)]
pub struct Dictionary {
    name: String,
    ranked: HashMap<String, usize>,
}

impl Dictionary {
    /// Create a dictionary from an existing rank map.
    #[must_use]
    pub fn new(name: impl Into<String>, ranked: &HashMap<String, usize>) -> Self {
        Self {
            name: name.into(),
            ranked: ranked.clone(),
        }
    }

    /// Create a dictionary from words in rank order (most common first).
    #[must_use]
    pub fn from_words<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ranked: words
                .into_iter()
                .enumerate()
                .map(|(i, w)| (w.into(), i + 1))
                .collect(),
        }
    }

    /// Dictionary name, used in reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rank of a word, if present. 1 is the most common entry.
    #[must_use]
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranked.get(word).copied()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Whether the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Read-only configuration consulted during an estimate.
///
/// Holds the ordered matcher collection the candidate gatherer runs, the
/// data those matchers look things up in, and the guess-rate table used only
/// for crack-time reporting. A configuration is immutable once built; use
/// [`ConfigurationBuilder`] to construct one.
pub struct Configuration {
    matchers: Vec<Box<dyn PatternMatcher>>,
    dictionaries: Vec<Dictionary>,
    leet_table: HashMap<char, Vec<char>>,
    min_year: i32,
    max_year: i32,
    guess_types: BTreeMap<String, f64>,
}

impl Configuration {
    /// The ordered pattern matchers consulted by the candidate gatherer.
    #[must_use]
    pub fn matchers(&self) -> &[Box<dyn PatternMatcher>] {
        &self.matchers
    }

    /// Ranked dictionaries for the dictionary matcher.
    #[must_use]
    pub fn dictionaries(&self) -> &[Dictionary] {
        &self.dictionaries
    }

    /// Leet-speak substitution table.
    #[must_use]
    pub fn leet_table(&self) -> &HashMap<char, Vec<char>> {
        &self.leet_table
    }

    /// Earliest year the date/year matchers consider plausible.
    #[must_use]
    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    /// Latest year the date/year matchers consider plausible.
    #[must_use]
    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Number of years in the plausible span.
    #[must_use]
    pub fn year_span(&self) -> u32 {
        (self.max_year - self.min_year + 1) as u32
    }

    /// Attack scenarios for crack-time reporting: display name to guesses
    /// per second.
    #[must_use]
    pub fn guess_types(&self) -> &BTreeMap<String, f64> {
        &self.guess_types
    }
}

impl Default for Configuration {
    fn default() -> Self {
        ConfigurationBuilder::default().build()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field(
                "matchers",
                &self.matchers.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field(
                "dictionaries",
                &self.dictionaries.iter().map(Dictionary::name).collect::<Vec<_>>(),
            )
            .field("min_year", &self.min_year)
            .field("max_year", &self.max_year)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Configuration`].
///
/// Every field has a sensible default; override only what the caller needs.
///
/// # Example
///
/// ```rust
/// use passgauge::{ConfigurationBuilder, Estimator};
/// use passgauge::matchers::{SequenceMatcher, SpatialMatcher};
///
/// let config = ConfigurationBuilder::default()
///     .matchers(vec![Box::new(SpatialMatcher::new()), Box::new(SequenceMatcher::new())])
///     .build();
/// let estimator = Estimator::new(config);
/// assert!(estimator.estimate("qwerty123").is_ok());
/// ```
#[derive(Default)]
pub struct ConfigurationBuilder {
    matchers: Option<Vec<Box<dyn PatternMatcher>>>,
    dictionaries: Option<Vec<Dictionary>>,
    leet_table: Option<HashMap<char, Vec<char>>>,
    year_range: Option<(i32, i32)>,
    guess_types: Option<BTreeMap<String, f64>>,
}

impl ConfigurationBuilder {
    /// Replace the matcher collection. Order is preserved.
    #[must_use]
    pub fn matchers(mut self, matchers: Vec<Box<dyn PatternMatcher>>) -> Self {
        self.matchers = Some(matchers);
        self
    }

    /// Replace the dictionary list.
    #[must_use]
    pub fn dictionaries(mut self, dictionaries: Vec<Dictionary>) -> Self {
        self.dictionaries = Some(dictionaries);
        self
    }

    /// Replace the leet substitution table.
    #[must_use]
    pub fn leet_table(mut self, table: HashMap<char, Vec<char>>) -> Self {
        self.leet_table = Some(table);
        self
    }

    /// Set the plausible year range for date and year matches.
    #[must_use]
    pub fn year_range(mut self, min: i32, max: i32) -> Self {
        self.year_range = Some((min.min(max), min.max(max)));
        self
    }

    /// Replace the crack-time reporting table (name to guesses per second).
    #[must_use]
    pub fn guess_types(mut self, guess_types: BTreeMap<String, f64>) -> Self {
        self.guess_types = Some(guess_types);
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    #[must_use]
    pub fn build(self) -> Configuration {
        let (min_year, max_year) = self.year_range.unwrap_or((1900, 2039));
        Configuration {
            matchers: self.matchers.unwrap_or_else(matchers::default_matchers),
            dictionaries: self
                .dictionaries
                .unwrap_or_else(data::default_dictionaries),
            leet_table: self
                .leet_table
                .unwrap_or_else(|| data::LEET_TABLE.clone()),
            min_year,
            max_year,
            guess_types: self.guess_types.unwrap_or_else(default_guess_types),
        }
    }
}

fn default_guess_types() -> BTreeMap<String, f64> {
    let mut table = BTreeMap::new();
    table.insert("Online throttled (100 guesses/hour)".to_string(), 100.0 / 3600.0);
    table.insert("Online unthrottled (10 guesses/second)".to_string(), 10.0);
    table.insert("Offline slow hash (1e4 guesses/second)".to_string(), 1e4);
    table.insert("Offline fast hash (1e10 guesses/second)".to_string(), 1e10);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_complete() {
        let config = Configuration::default();
        assert_eq!(config.matchers().len(), 5);
        assert_eq!(config.dictionaries().len(), 3);
        assert!(!config.leet_table().is_empty());
        assert!(!config.guess_types().is_empty());
        assert_eq!(config.year_span(), 140);
    }

    #[test]
    fn builder_overrides_stick() {
        let config = ConfigurationBuilder::default()
            .matchers(vec![])
            .dictionaries(vec![Dictionary::from_words("tiny", ["alpha", "beta"])])
            .year_range(1950, 2000)
            .build();
        assert!(config.matchers().is_empty());
        assert_eq!(config.dictionaries()[0].rank("beta"), Some(2));
        assert_eq!(config.year_span(), 51);
    }

    #[test]
    fn year_range_normalizes_order() {
        let config = ConfigurationBuilder::default().year_range(2000, 1990).build();
        assert_eq!(config.min_year(), 1990);
        assert_eq!(config.max_year(), 2000);
    }

    #[test]
    fn dictionary_lookup() {
        let dict = Dictionary::from_words("d", ["zero", "one"]);
        assert_eq!(dict.rank("zero"), Some(1));
        assert_eq!(dict.rank("two"), None);
        assert_eq!(dict.len(), 2);
        assert!(!dict.is_empty());
    }
}
