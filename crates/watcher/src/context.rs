//! Long-lived state owned by one watcher instance.

use std::time::Instant;

use upwatch_status::UpdateState;

/// Mutable state of a single watcher instance.
///
/// Constructed fresh at watcher start and re-derived entirely from the
/// external status source; nothing here persists across restarts. Only the
/// state machine mutates it, once per read cycle.
#[derive(Debug, Clone)]
pub struct WatcherContext {
    /// State after the most recent read.
    pub current: UpdateState,
    /// State before the most recent read, for edge detection.
    pub previous: UpdateState,
    /// `last_check` timestamp from the most recent read (epoch seconds).
    pub last_check: i64,
    /// `last_update` timestamp from the most recent read (epoch seconds).
    pub last_update: i64,
    /// Local clock of our own last check request.
    ///
    /// Guards the cooldown even when a stalled external updater never bumps
    /// its `last_check` timestamp.
    pub last_check_requested_at: Option<Instant>,
}

impl WatcherContext {
    pub fn new() -> Self {
        Self {
            current: UpdateState::NoUpdates,
            previous: UpdateState::NoUpdates,
            last_check: 0,
            last_update: 0,
            last_check_requested_at: None,
        }
    }

    /// Records that a check request was just handed to the sink.
    pub fn mark_check_requested(&mut self) {
        self.last_check_requested_at = Some(Instant::now());
    }
}

impl Default for WatcherContext {
    fn default() -> Self {
        Self::new()
    }
}
