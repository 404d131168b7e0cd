//! Typed event payloads pushed through the `NotificationSink`.
//!
//! The `GameEvent` envelope mirrors the wire shape downstream renderers
//! consume (tagged, snake_case); sinks that only need a log can store the
//! envelope as-is.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::chain::{Mode, RejectReason};
use crate::domain::roster::{Participant, UserId};
use crate::domain::state::PartyKey;

/// Why a participant left the game mid-play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationReason {
    Timeout,
    Forfeit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnStarted {
    pub key: PartyKey,
    pub user_id: UserId,
    pub anchor: Option<String>,
    pub timer_seconds: u64,
    pub chain_number: u32,
}

/// Periodic countdown tick; purely informational and safe to drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Countdown {
    pub key: PartyKey,
    pub user_id: UserId,
    pub remaining_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordAccepted {
    pub key: PartyKey,
    pub user_id: UserId,
    pub word: String,
    pub next_anchor: String,
    pub words_in_chain: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordRejected {
    pub key: PartyKey,
    pub user_id: UserId,
    pub word: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEliminated {
    pub key: PartyKey,
    pub user_id: UserId,
    pub reason: EliminationReason,
    pub remaining_players: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainReset {
    pub key: PartyKey,
    /// Number of the fresh chain that play continues on.
    pub chain_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameFinished {
    pub key: PartyKey,
    /// `None` on the draw edge case (no live players remain).
    pub winner: Option<UserId>,
    pub total_words: usize,
    pub chain_resets: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameCancelled {
    pub key: PartyKey,
}

/// Envelope over every event the engine emits, in commit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStarted(TurnStarted),
    Countdown(Countdown),
    WordAccepted(WordAccepted),
    WordRejected(WordRejected),
    PlayerEliminated(PlayerEliminated),
    ChainReset(ChainReset),
    GameFinished(GameFinished),
    GameCancelled(GameCancelled),
}

/// Completed-session facts handed to the `PersistenceGateway`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub key: PartyKey,
    pub mode: Mode,
    pub winner: Option<UserId>,
    pub participants: Vec<Participant>,
    pub total_words: usize,
    pub chain_resets: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
}
