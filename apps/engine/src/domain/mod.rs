//! Domain layer: pure game logic, no I/O and no locks.

pub mod chain;
pub mod events;
pub mod roster;
pub mod state;

#[cfg(test)]
mod tests_props_chain;

// Re-exports for ergonomics
pub use chain::{evaluate, Accepted, Mode, RejectReason};
pub use events::{EliminationReason, GameEvent, SessionSummary};
pub use roster::{Participant, Roster, UserId};
pub use state::{ChainState, PartyKey, SessionPhase, SessionStatus};
