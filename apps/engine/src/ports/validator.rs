//! Asynchronous dictionary lookup.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;

/// Outcome of a successful dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordVerdict {
    /// The word exists in the dictionary.
    pub valid: bool,
    /// The word is a plural form (banned by the house rules).
    pub plural: bool,
    /// Human-readable detail for rejections, when the source provides one.
    pub detail: Option<String>,
}

impl WordVerdict {
    pub fn valid_word() -> Self {
        Self {
            valid: true,
            plural: false,
            detail: None,
        }
    }

    pub fn plural() -> Self {
        Self {
            valid: true,
            plural: true,
            detail: None,
        }
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self {
            valid: false,
            plural: false,
            detail: Some(detail.into()),
        }
    }
}

/// The lookup itself failed (network, upstream outage).
///
/// Never treated as an elimination: the engine surfaces it as a retryable
/// rejection and the submitter keeps the turn.
#[derive(Debug, Clone)]
pub struct ValidationUnavailable {
    pub detail: String,
}

impl ValidationUnavailable {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl Display for ValidationUnavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "word validation unavailable: {}", self.detail)
    }
}

impl Error for ValidationUnavailable {}

/// Decides whether a candidate is a real, non-plural dictionary word.
///
/// Implementations may be slow; the engine awaits this call without holding
/// any session lock, so a running turn timer can still fire and preempt the
/// result.
#[async_trait]
pub trait WordValidator: Send + Sync {
    async fn check(&self, word: &str) -> Result<WordVerdict, ValidationUnavailable>;
}
