//! Collaborator traits for the watcher's two outward side effects.

use crate::notification::Notification;

/// Error type reported by sinks. Sink failures are logged and the next
/// cycle proceeds normally; they never take the watcher down.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Delivers a notification to the user.
///
/// The transport (desktop notification pipe, D-Bus, a test buffer) is the
/// implementor's business. The watcher guarantees exactly one call per
/// qualifying edge.
pub trait NotificationSink: Send {
    fn send(&mut self, notification: &Notification) -> Result<(), SinkError>;
}

/// Receives "run an update check" requests.
///
/// The implementor is solely responsible for executing the privileged
/// updater command; the watcher core never runs it.
pub trait CheckRequestSink: Send {
    fn request_check(&mut self) -> Result<(), SinkError>;
}

/// Sink that drops everything. Useful for profiles with notifications
/// disabled and in tests.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn send(&mut self, _notification: &Notification) -> Result<(), SinkError> {
        Ok(())
    }
}

impl CheckRequestSink for NullSink {
    fn request_check(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
