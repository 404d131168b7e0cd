//! Per-party game session: the state machine driving lobby membership,
//! turns, the validation/timeout race, eliminations, and completion.
//!
//! Every transition runs under one `tokio::sync::Mutex`, so operations on a
//! session appear atomic to concurrent submissions, timeouts, and membership
//! changes. The asynchronous dictionary lookup is the single exception: the
//! lock is released across that await so a running turn timer can still fire
//! and preempt the result. Re-entry re-checks the turn sequence and discards
//! stale outcomes.

use std::sync::{Arc, Weak};
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::chain::{self, Mode, RejectReason};
use crate::domain::events::{
    ChainReset, Countdown, EliminationReason, GameCancelled, GameFinished, PlayerEliminated,
    SessionSummary, TurnStarted, WordAccepted, WordRejected,
};
use crate::domain::roster::{Participant, Roster, UserId};
use crate::domain::state::{ChainState, PartyKey, SessionPhase, SessionStatus};
use crate::error::EngineError;
use crate::errors::domain::GameError;
use crate::ports::notifier::NotificationSink;
use crate::ports::persistence::PersistenceGateway;
use crate::ports::validator::WordValidator;
use crate::services::registry::SessionRegistry;
use crate::services::turn_timer::{TimerHandle, TimerHooks, TurnTimer};

/// Collaborators every session talks to.
#[derive(Clone)]
pub struct SessionDeps {
    pub validator: Arc<dyn WordValidator>,
    pub persistence: Arc<dyn PersistenceGateway>,
    pub notifier: Arc<dyn NotificationSink>,
    /// Held weakly so finished sessions can unregister themselves without
    /// keeping the registry alive.
    pub registry: Weak<SessionRegistry>,
}

/// Fixed per-party settings chosen at creation.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub mode: Mode,
    pub turn_duration: Duration,
    pub progress_interval: Duration,
    pub min_players: usize,
    pub max_players: usize,
}

/// Result of a word submission. Rejections and discards are not errors:
/// the caller's turn state is exactly what the variant says it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Word joined the chain; play moved to the next participant.
    Accepted {
        word: String,
        next_anchor: String,
        words_in_chain: usize,
    },
    /// Word turned down; the submitter keeps the turn and the timer runs on.
    Rejected { word: String, reason: RejectReason },
    /// The turn was resolved (timeout or forfeit) while validation was in
    /// flight; the result was discarded.
    Discarded,
}

struct SessionCore {
    phase: SessionPhase,
    roster: Roster,
    chain: ChainState,
    timer: Option<TimerHandle>,
    /// Bumps whenever a turn resolves; stale timer fires and stale
    /// validation results are detected by comparing against it.
    turn_seq: u64,
    started_at: Option<OffsetDateTime>,
}

pub(crate) struct SessionShared {
    key: PartyKey,
    creator_id: UserId,
    settings: SessionSettings,
    deps: SessionDeps,
    core: Mutex<SessionCore>,
}

/// Handle to one party's session; cheap to clone.
#[derive(Clone)]
pub struct GameSession {
    shared: Arc<SessionShared>,
}

// Manual impl: the collaborator trait objects are not Debug.
impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("key", &self.shared.key)
            .field("creator_id", &self.shared.creator_id)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    pub fn new(
        key: PartyKey,
        creator_id: UserId,
        creator_name: impl Into<String>,
        settings: SessionSettings,
        deps: SessionDeps,
    ) -> Self {
        let mut roster = Roster::new();
        roster.add(creator_id, creator_name);
        let shared = Arc::new(SessionShared {
            key,
            creator_id,
            settings,
            deps,
            core: Mutex::new(SessionCore {
                phase: SessionPhase::Lobby,
                roster,
                chain: ChainState::new(),
                timer: None,
                turn_seq: 0,
                started_at: None,
            }),
        });
        info!(
            guild_id = key.guild_id,
            channel_id = key.channel_id,
            creator_id,
            "party created"
        );
        Self { shared }
    }

    pub fn key(&self) -> PartyKey {
        self.shared.key
    }

    pub fn creator_id(&self) -> UserId {
        self.shared.creator_id
    }

    /// Lobby: add a participant at the end of the turn order.
    pub async fn join(&self, user_id: UserId, display_name: &str) -> Result<Participant, GameError> {
        let mut core = self.shared.core.lock().await;
        if core.phase != SessionPhase::Lobby {
            return Err(GameError::InvalidState {
                operation: "join",
                phase: core.phase,
            });
        }
        if core.roster.contains(user_id) {
            return Err(GameError::AlreadyJoined);
        }
        if core.roster.len() >= self.shared.settings.max_players {
            return Err(GameError::PartyFull {
                max: self.shared.settings.max_players,
            });
        }
        let participant = core.roster.add(user_id, display_name).clone();
        info!(
            channel_id = self.shared.key.channel_id,
            user_id, "player joined"
        );
        Ok(participant)
    }

    /// Lobby: remove a participant, closing the gap in turn order.
    pub async fn leave(&self, user_id: UserId) -> Result<(), GameError> {
        let mut core = self.shared.core.lock().await;
        if core.phase != SessionPhase::Lobby {
            return Err(GameError::InvalidState {
                operation: "leave",
                phase: core.phase,
            });
        }
        if core.roster.remove(user_id).is_none() {
            return Err(GameError::NotInParty);
        }
        info!(
            channel_id = self.shared.key.channel_id,
            user_id, "player left lobby"
        );
        Ok(())
    }

    /// Lobby → Active: fix the turn order, clear the anchor, start the
    /// first timer. Any participant may start the game.
    pub async fn start(&self, user_id: UserId) -> Result<(), GameError> {
        let mut core = self.shared.core.lock().await;
        if core.phase != SessionPhase::Lobby {
            return Err(GameError::InvalidState {
                operation: "start",
                phase: core.phase,
            });
        }
        if !core.roster.contains(user_id) {
            return Err(GameError::NotInParty);
        }
        let have = core.roster.len();
        let need = self.shared.settings.min_players;
        if have < need {
            return Err(GameError::NotEnoughPlayers { have, need });
        }
        core.started_at = Some(OffsetDateTime::now_utc());
        info!(
            channel_id = self.shared.key.channel_id,
            players = have,
            "game started"
        );
        SessionShared::begin_turn(&self.shared, &mut core).await;
        Ok(())
    }

    /// Lobby → Cancelled (creator only).
    pub async fn cancel(&self, user_id: UserId) -> Result<(), GameError> {
        let mut core = self.shared.core.lock().await;
        if core.phase != SessionPhase::Lobby {
            return Err(GameError::InvalidState {
                operation: "cancel",
                phase: core.phase,
            });
        }
        if user_id != self.shared.creator_id {
            return Err(GameError::NotCreator);
        }
        core.phase = SessionPhase::Cancelled;
        info!(channel_id = self.shared.key.channel_id, "party cancelled");
        observe(
            self.shared
                .deps
                .notifier
                .game_cancelled(GameCancelled {
                    key: self.shared.key,
                })
                .await,
            "game_cancelled",
        );
        if let Some(registry) = self.shared.deps.registry.upgrade() {
            registry.remove(&self.shared.key);
        }
        Ok(())
    }

    /// Submit a word for the current turn.
    ///
    /// The dictionary verdict is awaited with the session lock released;
    /// the turn timer deliberately keeps running, and a timeout that lands
    /// during the wait wins over a late acceptance.
    pub async fn submit_word(
        &self,
        user_id: UserId,
        raw: &str,
    ) -> Result<SubmitOutcome, GameError> {
        let shared = &self.shared;
        let (word, seq) = {
            let mut core = shared.core.lock().await;
            match core.phase {
                SessionPhase::AwaitingTurn => {}
                phase => {
                    return Err(GameError::InvalidState {
                        operation: "submit_word",
                        phase,
                    })
                }
            }
            if core.roster.current_player().map(|p| p.user_id) != Some(user_id) {
                return Err(GameError::NotYourTurn);
            }
            let word = chain::normalize(raw);
            if !chain::is_well_formed(&word) {
                // Not even a word shape; no dictionary call, no counters.
                return Ok(SubmitOutcome::Rejected {
                    word,
                    reason: RejectReason::Malformed,
                });
            }
            core.phase = SessionPhase::Validating;
            (word, core.turn_seq)
        };

        // Suspension point: no lock held, timer still running.
        let verdict = shared.deps.validator.check(&word).await;

        let mut core = shared.core.lock().await;
        if core.turn_seq != seq || core.phase != SessionPhase::Validating {
            debug!(
                channel_id = shared.key.channel_id,
                word, "validation result arrived after the turn resolved; discarded"
            );
            return Ok(SubmitOutcome::Discarded);
        }

        let evaluation = match verdict {
            Err(err) => {
                warn!(error = %err, word, "word validation unavailable");
                Err(RejectReason::ValidationUnavailable)
            }
            Ok(v) if !v.valid => Err(RejectReason::NotAWord {
                detail: v
                    .detail
                    .unwrap_or_else(|| "not found in the dictionary".to_string()),
            }),
            Ok(v) => chain::evaluate(
                self.shared.settings.mode,
                core.chain.anchor.as_deref(),
                &word,
                &core.chain.used_words,
                v.plural,
            ),
        };

        match evaluation {
            Err(reason) => {
                // Warning, not a transition: same turn, same timer.
                core.phase = SessionPhase::AwaitingTurn;
                core.roster.note_invalid_attempt(user_id);
                observe(
                    shared
                        .deps
                        .persistence
                        .record_word(shared.key, &word, user_id, false)
                        .await,
                    "record_word",
                );
                observe(
                    shared
                        .deps
                        .notifier
                        .word_rejected(WordRejected {
                            key: shared.key,
                            user_id,
                            word: word.clone(),
                            reason: reason.clone(),
                        })
                        .await,
                    "word_rejected",
                );
                Ok(SubmitOutcome::Rejected { word, reason })
            }
            Ok(accepted) => {
                // The resolved flag is the arbiter: if the fire path beat us
                // here, the pending timeout owns this turn.
                let cancel_won = core.timer.as_ref().map_or(true, TimerHandle::cancel);
                if !cancel_won {
                    core.phase = SessionPhase::AwaitingTurn;
                    debug!(
                        channel_id = shared.key.channel_id,
                        word = accepted.word,
                        "timeout preempted a late acceptance"
                    );
                    return Ok(SubmitOutcome::Discarded);
                }
                core.timer = None;
                core.chain.accept(&accepted);
                core.roster.note_word_played(user_id);
                let words_in_chain = core.chain.chain_words.len();
                observe(
                    shared
                        .deps
                        .persistence
                        .record_word(shared.key, &accepted.word, user_id, true)
                        .await,
                    "record_word",
                );
                observe(
                    shared
                        .deps
                        .notifier
                        .word_accepted(WordAccepted {
                            key: shared.key,
                            user_id,
                            word: accepted.word.clone(),
                            next_anchor: accepted.next_anchor.clone(),
                            words_in_chain,
                        })
                        .await,
                    "word_accepted",
                );
                core.roster.advance();
                SessionShared::begin_turn(shared, &mut core).await;
                Ok(SubmitOutcome::Accepted {
                    word: accepted.word,
                    next_anchor: accepted.next_anchor,
                    words_in_chain,
                })
            }
        }
    }

    /// Voluntary elimination; takes the same path as a timeout.
    pub async fn forfeit(&self, user_id: UserId) -> Result<(), GameError> {
        let shared = &self.shared;
        let mut core = shared.core.lock().await;
        if !core.phase.is_active() {
            return Err(GameError::InvalidState {
                operation: "forfeit",
                phase: core.phase,
            });
        }
        match core.roster.get(user_id) {
            Some(p) if !p.is_eliminated => {}
            _ => return Err(GameError::NotInParty),
        }
        if let Some(timer) = core.timer.take() {
            timer.cancel();
        }
        // Invalidate any in-flight validation and any pending timeout fire.
        core.turn_seq += 1;
        SessionShared::eliminate(shared, &mut core, user_id, EliminationReason::Forfeit).await;
        Ok(())
    }

    /// Point-in-time view for the command layer.
    pub async fn status(&self) -> SessionStatus {
        let core = self.shared.core.lock().await;
        SessionStatus {
            key: self.shared.key,
            phase: core.phase,
            mode: self.shared.settings.mode,
            creator_id: self.shared.creator_id,
            timer_seconds: self.shared.settings.turn_duration.as_secs(),
            current_player: core.roster.current_player().map(|p| p.user_id),
            anchor: core.chain.anchor.clone(),
            chain_number: core.chain.chain_number,
            words_in_chain: core.chain.chain_words.len(),
            participants: core.roster.participants().to_vec(),
        }
    }

    /// Whether the user is a participant (any phase).
    pub async fn contains(&self, user_id: UserId) -> bool {
        self.shared.core.lock().await.roster.contains(user_id)
    }
}

impl SessionShared {
    /// Begin the next turn: bump the sequence, arm the timer, announce.
    ///
    /// Caller has already positioned the roster cursor on the new current
    /// player.
    async fn begin_turn(shared: &Arc<Self>, core: &mut SessionCore) {
        let Some(current) = core.roster.current_player() else {
            return;
        };
        let user_id = current.user_id;
        // Invariant: never two live timers for one session.
        debug_assert!(
            core.timer.as_ref().map_or(true, TimerHandle::is_resolved),
            "previous turn timer still unresolved"
        );
        core.turn_seq += 1;
        core.phase = SessionPhase::AwaitingTurn;
        let hooks = TurnHooks {
            shared: Arc::downgrade(shared),
            seq: core.turn_seq,
            user_id,
        };
        core.timer = Some(TurnTimer::start(
            shared.settings.turn_duration,
            shared.settings.progress_interval,
            hooks,
        ));
        observe(
            shared
                .deps
                .notifier
                .turn_started(TurnStarted {
                    key: shared.key,
                    user_id,
                    anchor: core.chain.anchor.clone(),
                    timer_seconds: shared.settings.turn_duration.as_secs(),
                    chain_number: core.chain.chain_number,
                })
                .await,
            "turn_started",
        );
    }

    /// Timer fire path; `seq` identifies the turn the timer belonged to.
    async fn on_turn_timeout(shared: Arc<Self>, seq: u64) {
        let mut core = shared.core.lock().await;
        if core.turn_seq != seq || !core.phase.is_active() {
            return;
        }
        let Some(user_id) = core.roster.current_player().map(|p| p.user_id) else {
            return;
        };
        // The fire path already resolved the handle.
        core.timer = None;
        info!(
            channel_id = shared.key.channel_id,
            user_id, "turn timed out"
        );
        Self::eliminate(&shared, &mut core, user_id, EliminationReason::Timeout).await;
    }

    /// Shared elimination path for timeout and forfeit: mark eliminated,
    /// then either finish the game or reset the chain and move on.
    async fn eliminate(
        shared: &Arc<Self>,
        core: &mut SessionCore,
        user_id: UserId,
        reason: EliminationReason,
    ) {
        core.roster.eliminate(user_id);
        let remaining = core.roster.active_count();
        info!(
            channel_id = shared.key.channel_id,
            user_id,
            ?reason,
            remaining,
            "player eliminated"
        );
        observe(
            shared
                .deps
                .notifier
                .player_eliminated(PlayerEliminated {
                    key: shared.key,
                    user_id,
                    reason,
                    remaining_players: remaining,
                })
                .await,
            "player_eliminated",
        );
        if remaining <= 1 {
            Self::finish(shared, core).await;
            return;
        }
        core.chain.reset();
        observe(
            shared
                .deps
                .notifier
                .chain_reset(ChainReset {
                    key: shared.key,
                    chain_number: core.chain.chain_number,
                })
                .await,
            "chain_reset",
        );
        core.roster.advance();
        Self::begin_turn(shared, core).await;
    }

    /// Terminal transition: report downstream, then unregister.
    async fn finish(shared: &Arc<Self>, core: &mut SessionCore) {
        core.phase = SessionPhase::Finished;
        if let Some(timer) = core.timer.take() {
            timer.cancel();
        }
        let winner = core.roster.winner().map(|p| p.user_id);
        let summary = SessionSummary {
            key: shared.key,
            mode: shared.settings.mode,
            winner,
            participants: core.roster.participants().to_vec(),
            total_words: core.chain.session_words,
            chain_resets: core.chain.resets,
            started_at: core.started_at,
            finished_at: OffsetDateTime::now_utc(),
        };
        info!(
            channel_id = shared.key.channel_id,
            winner = winner.unwrap_or(-1),
            total_words = summary.total_words,
            "game finished"
        );
        observe(
            shared
                .deps
                .notifier
                .game_finished(GameFinished {
                    key: shared.key,
                    winner,
                    total_words: summary.total_words,
                    chain_resets: summary.chain_resets,
                })
                .await,
            "game_finished",
        );
        observe(
            shared
                .deps
                .persistence
                .record_completed_session(&summary)
                .await,
            "record_completed_session",
        );
        if let Some(registry) = shared.deps.registry.upgrade() {
            registry.remove(&shared.key);
        }
    }
}

/// Timer callbacks for one turn; holds the session weakly so an abandoned
/// session can drop even with a timer still pending.
struct TurnHooks {
    shared: Weak<SessionShared>,
    seq: u64,
    user_id: UserId,
}

#[async_trait::async_trait]
impl TimerHooks for TurnHooks {
    async fn on_progress(&self, remaining: Duration) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let event = Countdown {
            key: shared.key,
            user_id: self.user_id,
            remaining_seconds: remaining.as_secs(),
        };
        if let Err(err) = shared.deps.notifier.countdown(event).await {
            debug!(error = %err, "countdown tick dropped");
        }
    }

    async fn on_timeout(&self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        SessionShared::on_turn_timeout(shared, self.seq).await;
    }
}

/// Log-and-swallow for collaborator calls downstream of committed state.
fn observe(result: Result<(), EngineError>, what: &'static str) {
    if let Err(err) = result {
        warn!(error = %err, call = what, "collaborator call failed");
    }
}
