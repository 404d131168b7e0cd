//! Domain-level error type exposed by session and registry operations.
//!
//! These are user errors: an operation that is illegal
//! for the current state or caller role fails immediately with no state
//! mutation. Word rejections are deliberately *not* here — a rejected word is
//! a warning event and the turn is retained.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::SessionPhase;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    /// `start` requires at least the configured minimum of players.
    NotEnoughPlayers { have: usize, need: usize },
    /// The lobby already holds the configured maximum.
    PartyFull { max: usize },
    /// The caller is already in this party.
    AlreadyJoined,
    /// The caller is not a participant of this party.
    NotInParty,
    /// Only the creator may cancel a lobby.
    NotCreator,
    /// A submission from someone other than the current participant.
    NotYourTurn,
    /// A live party already exists for this key.
    PartyExists,
    /// No live party exists for this key.
    PartyNotFound,
    /// The operation is not legal in the session's current phase.
    InvalidState {
        operation: &'static str,
        phase: SessionPhase,
    },
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GameError::NotEnoughPlayers { have, need } => {
                write!(f, "not enough players: have {have}, need {need}")
            }
            GameError::PartyFull { max } => write!(f, "party is full ({max} players max)"),
            GameError::AlreadyJoined => write!(f, "already joined this party"),
            GameError::NotInParty => write!(f, "not a participant of this party"),
            GameError::NotCreator => write!(f, "only the party creator may do this"),
            GameError::NotYourTurn => write!(f, "it is not your turn"),
            GameError::PartyExists => write!(f, "an active party already exists here"),
            GameError::PartyNotFound => write!(f, "no active party here"),
            GameError::InvalidState { operation, phase } => {
                write!(f, "{operation} is not legal in phase {phase:?}")
            }
        }
    }
}

impl Error for GameError {}
