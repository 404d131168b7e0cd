//! Outward push notifications for display layers.

use async_trait::async_trait;

use crate::domain::events::{
    ChainReset, Countdown, GameCancelled, GameFinished, PlayerEliminated, TurnStarted,
    WordAccepted, WordRejected,
};
use crate::error::EngineError;

/// Receives engine events in the order the state machine committed them.
///
/// Delivery failures are logged by the engine and swallowed; they never
/// affect state machine correctness.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn turn_started(&self, event: TurnStarted) -> Result<(), EngineError>;
    /// Countdown ticks may be dropped or coalesced freely.
    async fn countdown(&self, event: Countdown) -> Result<(), EngineError>;
    async fn word_accepted(&self, event: WordAccepted) -> Result<(), EngineError>;
    async fn word_rejected(&self, event: WordRejected) -> Result<(), EngineError>;
    async fn player_eliminated(&self, event: PlayerEliminated) -> Result<(), EngineError>;
    async fn chain_reset(&self, event: ChainReset) -> Result<(), EngineError>;
    async fn game_finished(&self, event: GameFinished) -> Result<(), EngineError>;
    async fn game_cancelled(&self, event: GameCancelled) -> Result<(), EngineError>;
}
