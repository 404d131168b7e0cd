//! In-memory adapters: a word-list validator, a recording store, and sinks.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::events::{
    ChainReset, Countdown, GameCancelled, GameEvent, GameFinished, PlayerEliminated,
    SessionSummary, TurnStarted, WordAccepted, WordRejected,
};
use crate::domain::roster::UserId;
use crate::domain::state::PartyKey;
use crate::error::EngineError;
use crate::ports::notifier::NotificationSink;
use crate::ports::persistence::PersistenceGateway;
use crate::ports::validator::{ValidationUnavailable, WordValidator, WordVerdict};

/// Irregular plurals the suffix heuristic would miss.
const IRREGULAR_PLURALS: &[&str] = &[
    "children", "men", "women", "feet", "teeth", "geese", "mice", "lice", "people", "oxen",
];

/// Validator backed by a fixed word set; plurals are flagged by listing.
///
/// Intended for tests and offline embedding, not as a real dictionary.
#[derive(Debug, Default)]
pub struct StaticWordList {
    words: HashSet<String>,
    plurals: HashSet<String>,
}

impl StaticWordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for word in words {
            list.words.insert(word.into().to_lowercase());
        }
        list
    }

    /// Add a word and mark it as a plural form.
    pub fn mark_plural(mut self, word: impl Into<String>) -> Self {
        let word = word.into().to_lowercase();
        self.words.insert(word.clone());
        self.plurals.insert(word);
        self
    }

    fn is_plural(&self, word: &str) -> bool {
        self.plurals.contains(word) || IRREGULAR_PLURALS.contains(&word)
    }
}

#[async_trait]
impl WordValidator for StaticWordList {
    async fn check(&self, word: &str) -> Result<WordVerdict, ValidationUnavailable> {
        let word = word.to_lowercase();
        if !self.words.contains(&word) {
            return Ok(WordVerdict::unknown(format!(
                "'{word}' is not in the word list"
            )));
        }
        if self.is_plural(&word) {
            return Ok(WordVerdict::plural());
        }
        Ok(WordVerdict::valid_word())
    }
}

/// One recorded submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWord {
    pub key: PartyKey,
    pub word: String,
    pub user_id: UserId,
    pub accepted: bool,
}

/// Persistence gateway that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: Mutex<Vec<RecordedWord>>,
    summaries: Mutex<Vec<SessionSummary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> Vec<RecordedWord> {
        self.words.lock().clone()
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.summaries.lock().clone()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryStore {
    async fn record_word(
        &self,
        key: PartyKey,
        word: &str,
        user_id: UserId,
        accepted: bool,
    ) -> Result<(), EngineError> {
        self.words.lock().push(RecordedWord {
            key,
            word: word.to_string(),
            user_id,
            accepted,
        });
        Ok(())
    }

    async fn record_completed_session(&self, summary: &SessionSummary) -> Result<(), EngineError> {
        self.summaries.lock().push(summary.clone());
        Ok(())
    }
}

/// Sink that appends every event to an in-memory log, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().clone()
    }

    fn push(&self, event: GameEvent) {
        self.events.lock().push(event);
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn turn_started(&self, event: TurnStarted) -> Result<(), EngineError> {
        self.push(GameEvent::TurnStarted(event));
        Ok(())
    }

    async fn countdown(&self, event: Countdown) -> Result<(), EngineError> {
        self.push(GameEvent::Countdown(event));
        Ok(())
    }

    async fn word_accepted(&self, event: WordAccepted) -> Result<(), EngineError> {
        self.push(GameEvent::WordAccepted(event));
        Ok(())
    }

    async fn word_rejected(&self, event: WordRejected) -> Result<(), EngineError> {
        self.push(GameEvent::WordRejected(event));
        Ok(())
    }

    async fn player_eliminated(&self, event: PlayerEliminated) -> Result<(), EngineError> {
        self.push(GameEvent::PlayerEliminated(event));
        Ok(())
    }

    async fn chain_reset(&self, event: ChainReset) -> Result<(), EngineError> {
        self.push(GameEvent::ChainReset(event));
        Ok(())
    }

    async fn game_finished(&self, event: GameFinished) -> Result<(), EngineError> {
        self.push(GameEvent::GameFinished(event));
        Ok(())
    }

    async fn game_cancelled(&self, event: GameCancelled) -> Result<(), EngineError> {
        self.push(GameEvent::GameCancelled(event));
        Ok(())
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    async fn turn_started(&self, _event: TurnStarted) -> Result<(), EngineError> {
        Ok(())
    }

    async fn countdown(&self, _event: Countdown) -> Result<(), EngineError> {
        Ok(())
    }

    async fn word_accepted(&self, _event: WordAccepted) -> Result<(), EngineError> {
        Ok(())
    }

    async fn word_rejected(&self, _event: WordRejected) -> Result<(), EngineError> {
        Ok(())
    }

    async fn player_eliminated(&self, _event: PlayerEliminated) -> Result<(), EngineError> {
        Ok(())
    }

    async fn chain_reset(&self, _event: ChainReset) -> Result<(), EngineError> {
        Ok(())
    }

    async fn game_finished(&self, _event: GameFinished) -> Result<(), EngineError> {
        Ok(())
    }

    async fn game_cancelled(&self, _event: GameCancelled) -> Result<(), EngineError> {
        Ok(())
    }
}
