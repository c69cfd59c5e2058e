//! Spatial matcher: walks over physically adjacent keys.

use crate::config::Configuration;
use crate::matchers::binomial;
use crate::{Match, MatchKind, PatternMatcher, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Minimum walk length worth reporting.
const MIN_WALK_LEN: usize = 3;

/// Neighbor offsets for slanted keyboard rows: left, right, and the four
/// half-step diagonals a staggered layout produces.
const SLANT_DELTAS: &[(i32, i32)] = &[(0, -1), (0, 1), (-1, 0), (-1, 1), (1, -1), (1, 0)];

/// Neighbor offsets for an aligned grid (keypad), diagonals included.
const GRID_DELTAS: &[(i32, i32)] = &[
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A keyboard layout: key positions plus the shifted variant of each key.
struct Layout {
    name: &'static str,
    positions: HashMap<char, (i32, i32)>,
    shifted: HashMap<char, (i32, i32)>,
    deltas: &'static [(i32, i32)],
    key_count: usize,
    average_degree: f64,
}

impl Layout {
    fn build(
        name: &'static str,
        rows: &[&str],
        shifted_rows: &[&str],
        deltas: &'static [(i32, i32)],
    ) -> Self {
        let mut positions = HashMap::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                if ch != ' ' {
                    positions.insert(ch, (r as i32, c as i32));
                }
            }
        }
        let mut shifted = HashMap::new();
        for (r, row) in shifted_rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                if ch != ' ' {
                    shifted.insert(ch, (r as i32, c as i32));
                }
            }
        }

        let key_count = positions.len();
        let occupied: Vec<(i32, i32)> = positions.values().copied().collect();
        let mut degree_total = 0usize;
        for &(r, c) in &occupied {
            degree_total += deltas
                .iter()
                .filter(|(dr, dc)| occupied.contains(&(r + dr, c + dc)))
                .count();
        }
        let average_degree = degree_total as f64 / key_count as f64;

        Self {
            name,
            positions,
            shifted,
            deltas,
            key_count,
            average_degree,
        }
    }

    fn position(&self, ch: char) -> Option<(i32, i32)> {
        self.positions.get(&ch).or_else(|| self.shifted.get(&ch)).copied()
    }

    fn is_shifted(&self, ch: char) -> bool {
        self.shifted.contains_key(&ch)
    }

    /// Direction slot from one key to an adjacent one, if they are adjacent.
    fn direction(&self, from: char, to: char) -> Option<usize> {
        let (fr, fc) = self.position(from)?;
        let (tr, tc) = self.position(to)?;
        self.deltas
            .iter()
            .position(|&(dr, dc)| (fr + dr, fc + dc) == (tr, tc))
    }
}

static QWERTY: Lazy<Layout> = Lazy::new(|| {
    Layout::build(
        "qwerty",
        &["`1234567890-=", "qwertyuiop[]\\", "asdfghjkl;'", "zxcvbnm,./"],
        &["~!@#$%^&*()_+", "QWERTYUIOP{}|", "ASDFGHJKL:\"", "ZXCVBNM<>?"],
        SLANT_DELTAS,
    )
});

static KEYPAD: Lazy<Layout> = Lazy::new(|| {
    Layout::build("keypad", &["789", "456", "123", " 0."], &[], GRID_DELTAS)
});

/// Keyboard-walk matcher.
///
/// Scans the password against each embedded layout for maximal walks of
/// adjacent keys. Entropy counts the walks an attacker would try: all
/// shorter walks from every starting key, with up to the observed number of
/// direction changes, plus a bonus for shifted keys.
#[derive(Debug, Clone, Default)]
pub struct SpatialMatcher;

impl SpatialMatcher {
    /// Create a new spatial matcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PatternMatcher for SpatialMatcher {
    fn find_matches(&self, _config: &Configuration, password: &str) -> Result<Vec<Match>> {
        let chars: Vec<char> = password.chars().collect();
        let mut matches = Vec::new();
        for layout in [&*QWERTY, &*KEYPAD] {
            walk_layout(layout, &chars, &mut matches);
        }
        Ok(matches)
    }

    fn name(&self) -> &'static str {
        "spatial"
    }
}

fn walk_layout(layout: &Layout, chars: &[char], matches: &mut Vec<Match>) {
    let mut i = 0;
    while i + 1 < chars.len() {
        let mut j = i + 1;
        let mut last_direction: Option<usize> = None;
        let mut turns = 0;
        let mut shifted = usize::from(layout.is_shifted(chars[i]));

        while j < chars.len() {
            match layout.direction(chars[j - 1], chars[j]) {
                Some(direction) => {
                    if last_direction != Some(direction) {
                        turns += 1;
                        last_direction = Some(direction);
                    }
                    shifted += usize::from(layout.is_shifted(chars[j]));
                    j += 1;
                }
                None => break,
            }
        }

        let len = j - i;
        if len >= MIN_WALK_LEN {
            let token: String = chars[i..j].iter().collect();
            matches.push(Match::new(
                MatchKind::Spatial {
                    layout: layout.name,
                    turns,
                    shifted,
                },
                i,
                j - 1,
                token,
                spatial_entropy(layout, len, turns, shifted),
            ));
        }
        i = j;
    }
}

fn spatial_entropy(layout: &Layout, len: usize, turns: usize, shifted: usize) -> f64 {
    let s = layout.key_count as f64;
    let d = layout.average_degree;

    let mut possibilities = 0.0;
    for i in 2..=len {
        let possible_turns = turns.min(i - 1);
        for j in 1..=possible_turns {
            possibilities += binomial(i - 1, j - 1) * s * d.powi(j as i32);
        }
    }
    let mut entropy = possibilities.log2();

    if shifted > 0 {
        let unshifted = len - shifted;
        if unshifted == 0 {
            entropy += 1.0;
        } else {
            let mut shift_ways = 0.0;
            for i in 1..=shifted.min(unshifted) {
                shift_ways += binomial(len, i);
            }
            entropy += shift_ways.log2().max(1.0);
        }
    }
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigurationBuilder;

    fn matches_for(password: &str) -> Vec<Match> {
        let config = ConfigurationBuilder::default().matchers(vec![]).build();
        SpatialMatcher::new().find_matches(&config, password).unwrap()
    }

    #[test]
    fn finds_home_row_walk() {
        let found = matches_for("qwerty");
        let walk = found
            .iter()
            .find(|m| m.start() == 0 && m.end() == 5)
            .expect("full walk");
        assert!(matches!(
            walk.kind(),
            MatchKind::Spatial { layout: "qwerty", turns: 1, shifted: 0 }
        ));
    }

    #[test]
    fn walk_stops_at_non_adjacent_key() {
        let found = matches_for("qwerty123");
        assert!(found.iter().any(|m| m.start() == 0 && m.end() == 5));
        // "123" is its own walk on the number row.
        assert!(found.iter().any(|m| m.start() == 6 && m.end() == 8));
        assert!(!found.iter().any(|m| m.end() > 5 && m.start() < 6));
    }

    #[test]
    fn vertical_walk_counts_turns() {
        let found = matches_for("1qaz");
        let walk = found.iter().find(|m| m.len() == 4).expect("vertical walk");
        assert!(matches!(walk.kind(), MatchKind::Spatial { layout: "qwerty", .. }));
    }

    #[test]
    fn keypad_walks_found() {
        let found = matches_for("741852");
        let keypad: Vec<_> = found
            .iter()
            .filter(|m| matches!(m.kind(), MatchKind::Spatial { layout: "keypad", .. }))
            .collect();
        assert_eq!(keypad.len(), 2);
        assert_eq!((keypad[0].start(), keypad[0].end()), (0, 2));
        assert_eq!((keypad[1].start(), keypad[1].end()), (3, 5));
    }

    #[test]
    fn shifted_keys_cost_extra() {
        let plain = matches_for("qwerty");
        let shifty = matches_for("QWErty");
        let e_plain = plain.iter().find(|m| m.len() == 6).unwrap().entropy();
        let e_shift = shifty.iter().find(|m| m.len() == 6).unwrap().entropy();
        assert!(e_shift > e_plain);
    }

    #[test]
    fn longer_walks_cost_more() {
        let short = matches_for("qwe");
        let long = matches_for("qwertyuiop");
        assert!(long[0].entropy() > short[0].entropy());
    }

    #[test]
    fn no_walks_in_scattered_input() {
        assert!(matches_for("qp1x0z").is_empty());
        assert!(matches_for("").is_empty());
    }
}
