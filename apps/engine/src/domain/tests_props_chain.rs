//! Property tests for the chain rule (pure domain, no timers).
//!
//! Contract under test:
//! - Accepted words always satisfy the anchor constraint of their mode
//! - The produced anchor is always the trailing 1–2 letters of the word
//! - A word already in the used set is never accepted
//! - Normalization means casing and surrounding whitespace never matter

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::chain::{evaluate, trailing, Mode, RejectReason};

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}"
}

proptest! {
    /// Accepted chains are continuous: feeding each word's produced anchor
    /// into the next evaluation never trips the anchor check.
    #[test]
    fn prop_accepted_words_chain_continuously(
        words in prop::collection::vec(word_strategy(), 1..20),
        hard in any::<bool>(),
    ) {
        let mode = if hard { Mode::Hard } else { Mode::Normal };
        let mut used = HashSet::new();
        let mut anchor: Option<String> = None;

        for word in words {
            // Force continuity by prefixing the required anchor.
            let candidate = match &anchor {
                Some(a) => format!("{a}{word}"),
                None => word,
            };
            if used.contains(&candidate) {
                continue;
            }
            let out = evaluate(mode, anchor.as_deref(), &candidate, &used, false)
                .expect("prefixed candidate must satisfy the anchor");
            prop_assert_eq!(&out.word, &candidate);
            prop_assert_eq!(&out.next_anchor, &trailing(&candidate, mode.anchor_len()));
            if let Some(a) = &anchor {
                prop_assert!(out.word.starts_with(a.as_str()));
            }
            used.insert(out.word.clone());
            anchor = Some(out.next_anchor);
        }
    }

    /// The anchor is exactly the trailing letters, capped at word length.
    #[test]
    fn prop_anchor_length_matches_mode(word in word_strategy(), hard in any::<bool>()) {
        let mode = if hard { Mode::Hard } else { Mode::Normal };
        let out = evaluate(mode, None, &word, &HashSet::new(), false).unwrap();
        prop_assert_eq!(out.next_anchor.len(), mode.anchor_len().min(word.len()));
        prop_assert!(word.ends_with(&out.next_anchor));
    }

    /// No reuse: once a word is in the used set it is always rejected.
    #[test]
    fn prop_used_words_are_rejected(word in word_strategy()) {
        let mut used = HashSet::new();
        used.insert(word.clone());
        let err = evaluate(Mode::Normal, None, &word, &used, false).unwrap_err();
        prop_assert_eq!(err, RejectReason::AlreadyUsed);
    }

    /// Casing and surrounding whitespace never change the outcome.
    #[test]
    fn prop_normalization_is_stable(word in word_strategy()) {
        let noisy = format!("  {}  ", word.to_uppercase());
        let clean = evaluate(Mode::Normal, None, &word, &HashSet::new(), false).unwrap();
        let messy = evaluate(Mode::Normal, None, &noisy, &HashSet::new(), false).unwrap();
        prop_assert_eq!(clean, messy);
    }

    /// The plural signal wins over everything except well-formedness.
    #[test]
    fn prop_plural_always_rejected(word in word_strategy()) {
        let err = evaluate(Mode::Normal, None, &word, &HashSet::new(), true).unwrap_err();
        prop_assert_eq!(err, RejectReason::Plural);
    }
}
