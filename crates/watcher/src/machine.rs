//! State transitions and notification edges.

use upwatch_status::{StatusRecord, UpdateState};

use crate::context::WatcherContext;
use crate::notification::NotificationKind;

/// Result of applying one status read to the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: UpdateState,
    pub to: UpdateState,
}

impl Transition {
    /// Whether the state actually changed on this read.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// The notification this transition warrants, if any.
    ///
    /// Only the rising edge into an actionable state notifies: entering
    /// `updates-available` or `updates-downloaded` from a different state.
    /// Downloading and installing are transient and surfaced by the UI
    /// without an interrupting alert; steady states never re-notify.
    pub fn notification(&self) -> Option<NotificationKind> {
        if !self.changed() {
            return None;
        }
        match self.to {
            UpdateState::UpdatesAvailable => Some(NotificationKind::UpdatesAvailable),
            UpdateState::UpdatesDownloaded => Some(NotificationKind::UpdatesDownloaded),
            _ => None,
        }
    }
}

impl WatcherContext {
    /// Advances the state machine with a freshly read record.
    ///
    /// Must only be called with a successfully parsed record; failed reads
    /// leave the context untouched so garbage data can't fake an edge.
    pub fn apply(&mut self, record: &StatusRecord) -> Transition {
        let from = self.current;
        self.previous = self.current;
        self.current = record.state;
        self.last_check = record.last_check;
        self.last_update = record.last_update;

        Transition {
            from,
            to: self.current,
        }
    }
}
