//! Collaborator seams the engine consumes but does not implement.

pub mod notifier;
pub mod persistence;
pub mod validator;

pub use notifier::NotificationSink;
pub use persistence::PersistenceGateway;
pub use validator::{ValidationUnavailable, WordValidator, WordVerdict};
