//! Date matcher: numeric calendar dates and standalone years.

use crate::config::Configuration;
use crate::{Match, MatchKind, PatternMatcher, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_SEPARATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,4})([-/. _])(\d{1,2})([-/. _])(\d{1,4})").expect("valid regex")
});

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:19|20)\d\d").expect("valid regex"));

/// Numeric date and year matcher.
///
/// Recognizes separated dates ("12/31/1999", "1999-1-3"), compact six- and
/// eight-digit dates ("311299", "19991231"), and standalone four-digit
/// years within the configured plausible range. A date costs the calendar
/// space (days × months × plausible years); a bare year costs only the year
/// span.
#[derive(Debug, Clone, Default)]
pub struct DateMatcher;

impl DateMatcher {
    /// Create a new date matcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PatternMatcher for DateMatcher {
    fn find_matches(&self, config: &Configuration, password: &str) -> Result<Vec<Match>> {
        let mut matches = Vec::new();

        for caps in DATE_SEPARATED.captures_iter(password) {
            let sep1 = caps.get(2).map(|m| m.as_str());
            let sep2 = caps.get(4).map(|m| m.as_str());
            if sep1 != sep2 {
                continue;
            }
            let fields = [&caps[1], &caps[3], &caps[5]];
            if let Some((day, month, year)) = parse_separated(config, fields) {
                let full = caps.get(0).expect("whole match");
                let separator = sep1.and_then(|s| s.chars().next());
                push_date(
                    &mut matches,
                    password,
                    full.start(),
                    full.as_str(),
                    day,
                    month,
                    year,
                    separator,
                    date_entropy(config, true),
                );
            }
        }

        for run in DIGIT_RUN.find_iter(password) {
            let digits = run.as_str();
            if digits.len() != 6 && digits.len() != 8 {
                continue;
            }
            if let Some((day, month, year)) = parse_compact(config, digits) {
                push_date(
                    &mut matches,
                    password,
                    run.start(),
                    digits,
                    day,
                    month,
                    year,
                    None,
                    date_entropy(config, false),
                );
            }
        }

        for year in YEAR.find_iter(password) {
            let value: i32 = year.as_str().parse().expect("four digits");
            if value < config.min_year() || value > config.max_year() {
                continue;
            }
            let start = char_index(password, year.start());
            matches.push(Match::new(
                MatchKind::Year,
                start,
                start + 3,
                year.as_str(),
                f64::from(config.year_span()).log2(),
            ));
        }

        Ok(matches)
    }

    fn name(&self) -> &'static str {
        "date"
    }
}

#[allow(clippy::too_many_arguments)]
fn push_date(
    matches: &mut Vec<Match>,
    password: &str,
    byte_start: usize,
    token: &str,
    day: u32,
    month: u32,
    year: i32,
    separator: Option<char>,
    entropy: f64,
) {
    let start = char_index(password, byte_start);
    let end = start + token.chars().count() - 1;
    matches.push(Match::new(
        MatchKind::Date {
            day,
            month,
            year,
            separator,
        },
        start,
        end,
        token,
        entropy,
    ));
}

/// Char index of a byte offset; matcher spans are char-based.
fn char_index(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx].chars().count()
}

fn date_entropy(config: &Configuration, separated: bool) -> f64 {
    let space = 31.0 * 12.0 * f64::from(config.year_span());
    space.log2() + if separated { 2.0 } else { 0.0 }
}

/// Try the plausible field orders for a separated date.
fn parse_separated(config: &Configuration, fields: [&str; 3]) -> Option<(u32, u32, i32)> {
    let values: Vec<u32> = fields.iter().filter_map(|f| f.parse().ok()).collect();
    if values.len() != 3 {
        return None;
    }
    let (a, b, c) = (values[0], values[1], values[2]);

    let candidates: &[(u32, u32, u32)] = if fields[0].len() == 4 {
        // year first
        &[(c, b, a), (b, c, a)]
    } else {
        // year last, day/month in either order
        &[(a, b, c), (b, a, c)]
    };
    candidates
        .iter()
        .find_map(|&(day, month, year)| validate(config, day, month, year, fields[0].len() == 4 || fields[2].len() == 4))
}

/// Try the plausible splits of a compact digit run.
fn parse_compact(config: &Configuration, digits: &str) -> Option<(u32, u32, i32)> {
    // Field offsets (year, month, day) for the YMD / MDY / DMY readings.
    let splits: &[(usize, usize, usize)] = if digits.len() == 8 {
        &[(0, 4, 6), (4, 0, 2), (4, 2, 0)]
    } else {
        &[(0, 2, 4), (4, 0, 2), (4, 2, 0)]
    };
    let four_digit_year = digits.len() == 8;
    for &(year_at, month_at, day_at) in splits {
        let year_len = if four_digit_year { 4 } else { 2 };
        let year: u32 = digits[year_at..year_at + year_len].parse().ok()?;
        let month: u32 = digits[month_at..month_at + 2].parse().ok()?;
        let day: u32 = digits[day_at..day_at + 2].parse().ok()?;
        if let Some(found) = validate(config, day, month, year, four_digit_year) {
            return Some(found);
        }
    }
    None
}

fn validate(
    config: &Configuration,
    day: u32,
    month: u32,
    year: u32,
    four_digit_year: bool,
) -> Option<(u32, u32, i32)> {
    if day == 0 || day > 31 || month == 0 || month > 12 {
        return None;
    }
    let year = if four_digit_year {
        year as i32
    } else {
        // Two-digit years: pivot on 50.
        if year > 50 {
            1900 + year as i32
        } else {
            2000 + year as i32
        }
    };
    if year < config.min_year() || year > config.max_year() {
        return None;
    }
    Some((day, month, year))
}
