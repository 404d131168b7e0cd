//! Cancellable countdown owned by one turn.
//!
//! The timer races against word acceptance and forfeit. Both resolution
//! paths funnel through a single `AtomicBool`: whichever side wins the
//! compare-exchange is authoritative and the loser is a no-op, so a handle
//! cancelled strictly before its deadline can never observe `on_timeout`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Callbacks a running timer feeds.
///
/// `on_progress` is informational only (countdown rendering); it must never
/// mutate game state. `on_timeout` fires at most once per handle.
#[async_trait]
pub trait TimerHooks: Send + Sync + 'static {
    async fn on_progress(&self, remaining: Duration);
    async fn on_timeout(&self);
}

/// Single-owner handle to a running turn timer.
#[derive(Debug)]
pub struct TimerHandle {
    resolved: Arc<AtomicBool>,
    token: CancellationToken,
}

impl TimerHandle {
    /// Resolve the timer from the cancel path.
    ///
    /// Returns `true` when this call won the race: the timeout will never
    /// fire. Returns `false` when the fire path already claimed the turn.
    pub fn cancel(&self) -> bool {
        let won = self
            .resolved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        self.token.cancel();
        won
    }

    /// True once either path has claimed the handle.
    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }
}

pub struct TurnTimer;

impl TurnTimer {
    /// Spawn the countdown task and hand back its handle.
    ///
    /// Progress callbacks arrive roughly every `progress_every` until the
    /// deadline; the terminal callback runs only if the fire path wins the
    /// resolved flag.
    pub fn start<H: TimerHooks>(
        duration: Duration,
        progress_every: Duration,
        hooks: H,
    ) -> TimerHandle {
        let resolved = Arc::new(AtomicBool::new(false));
        let token = CancellationToken::new();

        let flag = Arc::clone(&resolved);
        let cancelled = token.clone();
        tokio::spawn(async move {
            let deadline = Instant::now() + duration;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                let step = remaining.min(progress_every);
                tokio::select! {
                    _ = cancelled.cancelled() => return,
                    _ = tokio::time::sleep(step) => {}
                }
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                hooks.on_progress(remaining).await;
            }
            // Single decision point shared with `TimerHandle::cancel`.
            if flag
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                hooks.on_timeout().await;
            }
        });

        TimerHandle { resolved, token }
    }
}
