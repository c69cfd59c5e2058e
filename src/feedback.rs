//! Feedback generation: turn a finished estimate into a warning and
//! actionable suggestions.

use crate::matches::{Match, MatchKind};
use crate::scoring::Estimate;
use serde::Serialize;

/// Threshold below which a dictionary word is called out as very common.
const TOP_RANK: usize = 100;

/// Password length below which length advice is offered.
const COMFORTABLE_LEN: usize = 12;

/// Advice derived from an estimate: at most one warning about the dominant
/// weakness, plus general suggestions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Feedback {
    /// The most important problem found, if any.
    pub warning: Option<String>,
    /// Ways to improve the password.
    pub suggestions: Vec<String>,
}

/// Produce feedback for an estimate.
///
/// The warning reflects the single largest recognized pattern; suggestions
/// accumulate across all of them.
#[must_use]
pub fn for_estimate(estimate: &Estimate) -> Feedback {
    let mut feedback = Feedback::default();
    let matches = estimate.matches();
    let length: usize = matches.iter().map(Match::len).sum();

    if length > 0 && length < COMFORTABLE_LEN {
        feedback
            .suggestions
            .push("Use a longer password; every extra character multiplies the work an attacker must do".to_string());
    }

    let dominant = matches
        .iter()
        .filter(|m| !m.is_brute_force())
        .max_by_key(|m| m.len());
    if let Some(dominant) = dominant {
        feedback.warning = warning_for(dominant, dominant.len() == length);
    }

    for m in matches {
        if let Some(suggestion) = suggestion_for(m) {
            if !feedback.suggestions.contains(&suggestion) {
                feedback.suggestions.push(suggestion);
            }
        }
    }

    if matches.iter().all(Match::is_brute_force) && length > 0 && length < 8 {
        feedback.warning =
            Some("Short passwords are quick to guess even when random".to_string());
    }

    feedback
}

fn warning_for(m: &Match, covers_everything: bool) -> Option<String> {
    match m.kind() {
        MatchKind::Dictionary { rank, reversed, leet, .. } => {
            let mut warning = if covers_everything && *rank <= TOP_RANK {
                "This is one of the most commonly used passwords".to_string()
            } else if covers_everything {
                "A single dictionary word is easy to guess".to_string()
            } else {
                "The password is built around a dictionary word".to_string()
            };
            if *reversed {
                warning.push_str("; spelling it backwards barely helps");
            }
            if *leet {
                warning.push_str("; predictable substitutions like '@' for 'a' barely help");
            }
            Some(warning)
        }
        MatchKind::Spatial { .. } => {
            Some("Keyboard patterns are among the first things attackers try".to_string())
        }
        MatchKind::Repeat { .. } => {
            Some("Repetitions add length but very little strength".to_string())
        }
        MatchKind::Sequence { .. } => {
            Some("Sequences like \"abcd\" or \"6543\" are easy to guess".to_string())
        }
        MatchKind::Date { .. } | MatchKind::Year => {
            Some("Dates and years are easy to guess, especially meaningful ones".to_string())
        }
        MatchKind::BruteForce => None,
    }
}

fn suggestion_for(m: &Match) -> Option<String> {
    match m.kind() {
        MatchKind::Dictionary { .. } => Some(
            "Combine several unrelated words instead of relying on one".to_string(),
        ),
        MatchKind::Spatial { .. } => {
            Some("Avoid straight rows and columns of keys".to_string())
        }
        MatchKind::Repeat { .. } => {
            Some("Avoid repeated characters and copy-pasted fragments".to_string())
        }
        MatchKind::Sequence { .. } => Some("Avoid alphabetic or numeric runs".to_string()),
        MatchKind::Date { .. } | MatchKind::Year => {
            Some("Avoid dates tied to you or your family".to_string())
        }
        MatchKind::BruteForce => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Estimator;

    fn feedback_for(password: &str) -> Feedback {
        let estimator = Estimator::default();
        for_estimate(&estimator.estimate(password).unwrap())
    }

    #[test]
    fn common_password_gets_strong_warning() {
        let feedback = feedback_for("password");
        let warning = feedback.warning.expect("warning for a top-ranked word");
        assert!(warning.contains("commonly used"));
    }

    #[test]
    fn keyboard_walk_warned() {
        let feedback = feedback_for("qwertyuiop");
        let warning = feedback.warning.expect("warning for a keyboard walk");
        assert!(warning.contains("Keyboard"));
    }

    #[test]
    fn short_random_password_warned() {
        let feedback = feedback_for("Xk7#p");
        let warning = feedback.warning.expect("warning for short random input");
        assert!(warning.contains("Short"));
    }

    #[test]
    fn long_random_password_is_clean() {
        let feedback = feedback_for("J8#mQz!4Lr@9Wx$2Yk");
        assert!(feedback.warning.is_none());
        assert!(feedback.suggestions.is_empty());
    }

    #[test]
    fn empty_password_no_advice() {
        let feedback = feedback_for("");
        assert!(feedback.warning.is_none());
        assert!(feedback.suggestions.is_empty());
    }

    #[test]
    fn suggestions_deduplicated() {
        let feedback = feedback_for("passwordpassword");
        let unique: std::collections::HashSet<&String> =
            feedback.suggestions.iter().collect();
        assert_eq!(unique.len(), feedback.suggestions.len());
    }
}
