//! Process-wide map of live sessions, one per party key.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use crate::domain::roster::UserId;
use crate::domain::state::PartyKey;
use crate::errors::domain::GameError;
use crate::services::session::GameSession;

/// Owns creation, lookup, and removal of sessions.
///
/// Creation and removal for the same key are mutually exclusive through the
/// map's shard locks; `insert_new` is the check-and-insert that guarantees
/// at most one live session per key.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<PartyKey, GameSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PartyKey) -> Option<GameSession> {
        self.sessions.get(key).map(|s| s.clone())
    }

    /// Register a freshly built session, failing if the key is taken.
    pub fn insert_new(&self, session: GameSession) -> Result<GameSession, GameError> {
        match self.sessions.entry(session.key()) {
            Entry::Occupied(_) => Err(GameError::PartyExists),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(session)
            }
        }
    }

    pub fn remove(&self, key: &PartyKey) -> Option<GameSession> {
        let removed = self.sessions.remove(key).map(|(_, s)| s);
        if removed.is_some() {
            info!(
                guild_id = key.guild_id,
                channel_id = key.channel_id,
                "session removed from registry"
            );
        }
        removed
    }

    /// The session (anywhere in the guild) that the user participates in.
    pub async fn find_for_user(&self, guild_id: i64, user_id: UserId) -> Option<GameSession> {
        // Snapshot first: membership checks take session locks and must not
        // run under the map's shard locks.
        let candidates: Vec<GameSession> = self
            .sessions
            .iter()
            .filter(|entry| entry.key().guild_id == guild_id)
            .map(|entry| entry.value().clone())
            .collect();
        for session in candidates {
            if session.contains(user_id).await {
                return Some(session);
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
