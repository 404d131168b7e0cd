//! Chain-continuity rule: pure checks applied to each candidate word.
//!
//! The dictionary verdict (is this a real word, is it a plural) comes from
//! the `WordValidator` port; `evaluate` only receives its plural signal and
//! never performs I/O.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Game mode controls how many trailing letters the next word must extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Next word must start with the last letter of the previous word.
    Normal,
    /// Next word must start with the last two letters of the previous word.
    Hard,
}

impl Mode {
    /// Number of letters the anchor carries in this mode.
    pub fn anchor_len(self) -> usize {
        match self {
            Mode::Normal => 1,
            Mode::Hard => 2,
        }
    }
}

/// Why a candidate word was turned down.
///
/// Rejections are warnings, not errors: the submitter keeps the turn and the
/// running timer is not touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RejectReason {
    /// Empty or contains non-letter characters after normalization.
    Malformed,
    /// Plural forms are banned outright.
    Plural,
    /// Does not start with the required trailing letters of the chain.
    WrongAnchor { required: String },
    /// Already played in the current chain.
    AlreadyUsed,
    /// The dictionary does not know this word.
    NotAWord { detail: String },
    /// The dictionary lookup failed; the submitter may simply retry.
    ValidationUnavailable,
}

/// A candidate that passed every check, plus the anchor it leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    /// Normalized (lowercase, trimmed) form of the word.
    pub word: String,
    /// Trailing letters the next submission must start with.
    pub next_anchor: String,
}

/// Lowercase and trim a raw submission.
pub fn normalize(candidate: &str) -> String {
    candidate.trim().to_lowercase()
}

/// A submission is well-formed when it is a single non-empty run of letters.
pub fn is_well_formed(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Trailing `n` characters of `word` (the whole word when shorter).
pub fn trailing(word: &str, n: usize) -> String {
    let len = word.chars().count();
    word.chars().skip(len.saturating_sub(n)).collect()
}

/// Apply the chain rule to a normalized-or-raw candidate.
///
/// Checks run in fixed order: well-formedness, the plural ban, the anchor
/// constraint, then reuse within the current chain. `anchor` is `None` only
/// for the first word of a chain, which may start with anything.
pub fn evaluate(
    mode: Mode,
    anchor: Option<&str>,
    candidate: &str,
    used: &HashSet<String>,
    is_plural: bool,
) -> Result<Accepted, RejectReason> {
    let word = normalize(candidate);
    if !is_well_formed(&word) {
        return Err(RejectReason::Malformed);
    }
    if is_plural {
        return Err(RejectReason::Plural);
    }
    if let Some(required) = anchor {
        if !word.starts_with(required) {
            return Err(RejectReason::WrongAnchor {
                required: required.to_string(),
            });
        }
    }
    if used.contains(&word) {
        return Err(RejectReason::AlreadyUsed);
    }
    let next_anchor = trailing(&word, mode.anchor_len());
    Ok(Accepted { word, next_anchor })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_words() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn first_word_of_chain_accepts_anything() {
        let out = evaluate(Mode::Normal, None, "Apple", &no_words(), false).unwrap();
        assert_eq!(out.word, "apple");
        assert_eq!(out.next_anchor, "e");
    }

    #[test]
    fn normal_mode_requires_one_letter_anchor() {
        let out = evaluate(Mode::Normal, Some("e"), "elephant", &no_words(), false).unwrap();
        assert_eq!(out.next_anchor, "t");

        let err = evaluate(Mode::Normal, Some("e"), "toast", &no_words(), false).unwrap_err();
        assert_eq!(
            err,
            RejectReason::WrongAnchor {
                required: "e".into()
            }
        );
    }

    #[test]
    fn hard_mode_carries_two_letters() {
        let out = evaluate(Mode::Hard, None, "planet", &no_words(), false).unwrap();
        assert_eq!(out.next_anchor, "et");

        let out = evaluate(Mode::Hard, Some("et"), "eternal", &no_words(), false).unwrap();
        assert_eq!(out.next_anchor, "al");
    }

    #[test]
    fn plural_signal_rejects_before_anchor_check() {
        let err = evaluate(Mode::Hard, Some("zz"), "cats", &no_words(), true).unwrap_err();
        assert_eq!(err, RejectReason::Plural);
    }

    #[test]
    fn reuse_within_chain_is_rejected_case_insensitively() {
        let mut used = no_words();
        used.insert("toast".to_string());
        let err = evaluate(Mode::Normal, Some("t"), "TOAST", &used, false).unwrap_err();
        assert_eq!(err, RejectReason::AlreadyUsed);
    }

    #[test]
    fn malformed_submissions_never_reach_the_anchor_check() {
        for raw in ["", "   ", "two words", "sem1colon"] {
            let err = evaluate(Mode::Normal, Some("t"), raw, &no_words(), false).unwrap_err();
            assert_eq!(err, RejectReason::Malformed, "raw = {raw:?}");
        }
    }

    #[test]
    fn short_word_in_hard_mode_anchors_on_what_it_has() {
        let out = evaluate(Mode::Hard, None, "a", &no_words(), false).unwrap();
        assert_eq!(out.next_anchor, "a");
    }
}
