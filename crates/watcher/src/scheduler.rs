//! Cooldown-gated scheduling of automatic update checks.

use std::time::Duration;

use crate::config::CheckGate;
use crate::context::WatcherContext;

/// Decides when an automatic "check for updates" request is due.
///
/// The scheduler only answers the question; issuing the request (and running
/// the privileged check command) belongs to the check-request sink.
#[derive(Debug, Clone)]
pub struct CheckScheduler {
    cooldown: Duration,
    gate: CheckGate,
}

impl CheckScheduler {
    pub fn new(cooldown: Duration, gate: CheckGate) -> Self {
        Self { cooldown, gate }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether an automatic check should be requested now.
    ///
    /// `now_epoch` is compared against the external writer's `last_check`
    /// timestamp; the context's local request clock is checked too so a
    /// stalled updater that never bumps `last_check` can't cause a request
    /// on every cycle.
    pub fn should_trigger(&self, now_epoch: i64, ctx: &WatcherContext) -> bool {
        if !self.gate_allows(ctx) {
            return false;
        }

        let elapsed = now_epoch.saturating_sub(ctx.last_check);
        if elapsed < self.cooldown.as_secs() as i64 {
            return false;
        }

        match ctx.last_check_requested_at {
            Some(requested) => requested.elapsed() >= self.cooldown,
            None => true,
        }
    }

    fn gate_allows(&self, ctx: &WatcherContext) -> bool {
        match self.gate {
            CheckGate::Always => true,
            CheckGate::OnlyWhenIdle => ctx.current.is_idle(),
        }
    }
}
