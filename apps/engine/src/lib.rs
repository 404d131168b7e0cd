#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Word-chain game session engine.
//!
//! Coordinates concurrent turn-based word-chain parties (one per channel):
//! lobby lifecycle, chain-constraint enforcement, the race between the
//! asynchronous dictionary lookup and the turn timer, timeout elimination,
//! and chain reset. Rendering, real persistence, and the dictionary itself
//! live behind the `ports` traits.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod ports;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::game::GameConfig;
pub use domain::chain::{Mode, RejectReason};
pub use domain::events::{GameEvent, SessionSummary};
pub use domain::roster::{Participant, UserId};
pub use domain::state::{PartyKey, SessionPhase, SessionStatus};
pub use error::EngineError;
pub use errors::domain::GameError;
pub use ports::notifier::NotificationSink;
pub use ports::persistence::PersistenceGateway;
pub use ports::validator::{ValidationUnavailable, WordValidator, WordVerdict};
pub use services::engine::{GameEngine, PartyOptions};
pub use services::session::{GameSession, SubmitOutcome};

// Prelude for embedder and test convenience
pub mod prelude {
    pub use super::adapters::*;
    pub use super::domain::*;
    pub use super::ports::*;
    pub use super::services::*;
    pub use super::{EngineError, GameConfig, GameError};
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
