use thiserror::Error;

use crate::errors::domain::GameError;

/// Crate-level error for embedders: configuration problems, collaborator
/// failures, and domain errors bubbled through the facade.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Gateway error: {detail}")]
    Gateway { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error(transparent)]
    Game(#[from] GameError),
}

impl EngineError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn gateway(detail: impl Into<String>) -> Self {
        Self::Gateway {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}
