//! Durable recording of session facts.

use async_trait::async_trait;

use crate::domain::events::SessionSummary;
use crate::domain::roster::UserId;
use crate::domain::state::PartyKey;
use crate::error::EngineError;

/// Fire-and-observe persistence: failures are logged at the call site and
/// never roll back committed in-memory state.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Record one submission, accepted or not.
    async fn record_word(
        &self,
        key: PartyKey,
        word: &str,
        user_id: UserId,
        accepted: bool,
    ) -> Result<(), EngineError>;

    /// Record the facts of a finished session.
    async fn record_completed_session(&self, summary: &SessionSummary) -> Result<(), EngineError>;
}
