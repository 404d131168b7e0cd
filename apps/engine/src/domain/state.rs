//! Session phases, party keys, and per-chain bookkeeping.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::chain::{Accepted, Mode};
use crate::domain::roster::{Participant, UserId};

/// Identifies the scope of one party: a single channel within a guild.
///
/// At most one live session exists per key; the guild id is carried so
/// "is this user already in a party somewhere in this guild" stays cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PartyKey {
    pub guild_id: i64,
    pub channel_id: i64,
}

impl PartyKey {
    pub fn new(guild_id: i64, channel_id: i64) -> Self {
        Self {
            guild_id,
            channel_id,
        }
    }
}

/// Lifecycle phases of a session.
///
/// `Validating` is `AwaitingTurn` with one submission in flight; the turn
/// timer keeps running across the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Lobby,
    AwaitingTurn,
    Validating,
    Finished,
    Cancelled,
}

impl SessionPhase {
    /// True for the phases in which turns are being played.
    pub fn is_active(self) -> bool {
        matches!(self, SessionPhase::AwaitingTurn | SessionPhase::Validating)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Finished | SessionPhase::Cancelled)
    }
}

/// State of the current unbroken chain, cleared on every elimination.
#[derive(Debug, Clone)]
pub struct ChainState {
    /// Trailing letters the next word must start with; `None` only right
    /// after session start or a reset.
    pub anchor: Option<String>,
    /// Words accepted into the current chain (normalized).
    pub used_words: HashSet<String>,
    /// Accepted words in play order, for reporting.
    pub chain_words: Vec<String>,
    /// 1-based chain counter; bumps on every reset.
    pub chain_number: u32,
    /// How many times the chain has been reset this session.
    pub resets: u32,
    /// Every word accepted across all chains (drives the summary total).
    pub session_words: usize,
}

impl ChainState {
    pub fn new() -> Self {
        Self {
            anchor: None,
            used_words: HashSet::new(),
            chain_words: Vec::new(),
            chain_number: 1,
            resets: 0,
            session_words: 0,
        }
    }

    /// Record an accepted word and move the anchor forward.
    pub fn accept(&mut self, accepted: &Accepted) {
        self.used_words.insert(accepted.word.clone());
        self.chain_words.push(accepted.word.clone());
        self.anchor = Some(accepted.next_anchor.clone());
        self.session_words += 1;
    }

    /// Clear the chain after an elimination: anchor gone, used set emptied.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.used_words.clear();
        self.chain_words.clear();
        self.chain_number += 1;
        self.resets += 1;
    }
}

impl Default for ChainState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of a session, for the command layer's status display.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub key: PartyKey,
    pub phase: SessionPhase,
    pub mode: Mode,
    pub creator_id: UserId,
    pub timer_seconds: u64,
    pub current_player: Option<UserId>,
    pub anchor: Option<String>,
    pub chain_number: u32,
    pub words_in_chain: usize,
    pub participants: Vec<Participant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_anchor_and_used_words_but_keeps_totals() {
        let mut chain = ChainState::new();
        chain.accept(&Accepted {
            word: "apple".into(),
            next_anchor: "e".into(),
        });
        chain.accept(&Accepted {
            word: "elephant".into(),
            next_anchor: "t".into(),
        });
        assert_eq!(chain.anchor.as_deref(), Some("t"));
        assert_eq!(chain.used_words.len(), 2);

        chain.reset();
        assert_eq!(chain.anchor, None);
        assert!(chain.used_words.is_empty());
        assert!(chain.chain_words.is_empty());
        assert_eq!(chain.chain_number, 2);
        assert_eq!(chain.resets, 1);
        assert_eq!(chain.session_words, 2);
    }

    #[test]
    fn words_are_reusable_after_a_reset() {
        let mut chain = ChainState::new();
        chain.accept(&Accepted {
            word: "apple".into(),
            next_anchor: "e".into(),
        });
        chain.reset();
        assert!(!chain.used_words.contains("apple"));
    }
}
