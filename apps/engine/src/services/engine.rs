//! The facade the command layer calls.
//!
//! Each operation maps 1:1 onto a session or registry operation; the engine
//! resolves party keys, wires collaborator handles into new sessions, and
//! nothing more.

use std::sync::Arc;
use std::time::Duration;

use crate::config::game::GameConfig;
use crate::domain::chain::Mode;
use crate::domain::roster::{Participant, UserId};
use crate::domain::state::{PartyKey, SessionStatus};
use crate::errors::domain::GameError;
use crate::ports::notifier::NotificationSink;
use crate::ports::persistence::PersistenceGateway;
use crate::ports::validator::WordValidator;
use crate::services::registry::SessionRegistry;
use crate::services::session::{GameSession, SessionDeps, SessionSettings, SubmitOutcome};

/// Per-party options picked at creation time.
#[derive(Debug, Clone)]
pub struct PartyOptions {
    pub mode: Mode,
    /// Falls back to the configured default when absent.
    pub timer_seconds: Option<u64>,
}

impl Default for PartyOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            timer_seconds: None,
        }
    }
}

pub struct GameEngine {
    config: GameConfig,
    registry: Arc<SessionRegistry>,
    validator: Arc<dyn WordValidator>,
    persistence: Arc<dyn PersistenceGateway>,
    notifier: Arc<dyn NotificationSink>,
}

impl GameEngine {
    pub fn new(
        config: GameConfig,
        validator: Arc<dyn WordValidator>,
        persistence: Arc<dyn PersistenceGateway>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            config,
            registry: Arc::new(SessionRegistry::new()),
            validator,
            persistence,
            notifier,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Create a party in this channel; the creator joins as participant 0.
    pub fn create_party(
        &self,
        key: PartyKey,
        creator_id: UserId,
        creator_name: &str,
        options: PartyOptions,
    ) -> Result<GameSession, GameError> {
        let timer_seconds = options
            .timer_seconds
            .unwrap_or(self.config.default_timer_seconds);
        let settings = SessionSettings {
            mode: options.mode,
            turn_duration: Duration::from_secs(timer_seconds),
            progress_interval: self.config.progress_interval(),
            min_players: self.config.min_players,
            max_players: self.config.max_players,
        };
        let deps = SessionDeps {
            validator: Arc::clone(&self.validator),
            persistence: Arc::clone(&self.persistence),
            notifier: Arc::clone(&self.notifier),
            registry: Arc::downgrade(&self.registry),
        };
        let session = GameSession::new(key, creator_id, creator_name, settings, deps);
        self.registry.insert_new(session)
    }

    pub async fn join_party(
        &self,
        key: PartyKey,
        user_id: UserId,
        display_name: &str,
    ) -> Result<Participant, GameError> {
        self.session(key)?.join(user_id, display_name).await
    }

    pub async fn leave_party(&self, key: PartyKey, user_id: UserId) -> Result<(), GameError> {
        self.session(key)?.leave(user_id).await
    }

    pub async fn start_game(&self, key: PartyKey, user_id: UserId) -> Result<(), GameError> {
        self.session(key)?.start(user_id).await
    }

    pub async fn submit_word(
        &self,
        key: PartyKey,
        user_id: UserId,
        word: &str,
    ) -> Result<SubmitOutcome, GameError> {
        self.session(key)?.submit_word(user_id, word).await
    }

    pub async fn forfeit(&self, key: PartyKey, user_id: UserId) -> Result<(), GameError> {
        self.session(key)?.forfeit(user_id).await
    }

    pub async fn cancel_party(&self, key: PartyKey, user_id: UserId) -> Result<(), GameError> {
        self.session(key)?.cancel(user_id).await
    }

    pub async fn status(&self, key: PartyKey) -> Result<SessionStatus, GameError> {
        Ok(self.session(key)?.status().await)
    }

    /// The party (anywhere in the guild) the user currently belongs to.
    pub async fn find_party_for_user(
        &self,
        guild_id: i64,
        user_id: UserId,
    ) -> Option<GameSession> {
        self.registry.find_for_user(guild_id, user_id).await
    }

    fn session(&self, key: PartyKey) -> Result<GameSession, GameError> {
        self.registry.get(&key).ok_or(GameError::PartyNotFound)
    }
}
