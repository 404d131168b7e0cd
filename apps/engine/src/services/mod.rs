//! Engine services: the session state machine and its coordination pieces.

pub mod engine;
pub mod registry;
pub mod session;
pub mod turn_timer;

pub use engine::{GameEngine, PartyOptions};
pub use registry::SessionRegistry;
pub use session::{GameSession, SessionDeps, SessionSettings, SubmitOutcome};
pub use turn_timer::{TimerHandle, TimerHooks, TurnTimer};
