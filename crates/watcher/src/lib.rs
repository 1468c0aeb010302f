//! Update-status watcher core.
//!
//! A single watcher instance owns a [`WatcherContext`], consumes one inbound
//! stream of [`WatcherEvent`]s, and runs one read-decide-act cycle per event:
//! read the status source, advance the state machine, emit a notification on
//! an actionable rising edge, and ask the check scheduler whether an
//! automatic "check for updates" is due.
//!
//! The watcher never runs updater commands and never writes the status file.
//! Both side effects go through the [`CheckRequestSink`] and
//! [`NotificationSink`] collaborator traits so a tray UI, a desktop shell,
//! or a headless daemon can supply their own transports.

mod config;
mod context;
mod fs_watch;
mod machine;
mod notification;
mod scheduler;
mod service;
mod sink;

pub use config::{CheckGate, WatcherConfig};
pub use context::WatcherContext;
pub use fs_watch::FsWatcher;
pub use machine::Transition;
pub use notification::{Notification, NotificationKind, NotificationTemplate, Templates};
pub use scheduler::CheckScheduler;
pub use service::{Watcher, WatcherEvent, WatcherHandle};
pub use sink::{CheckRequestSink, NotificationSink, NullSink, SinkError};

/// Errors produced by the watcher service.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("status read error: {0}")]
    Status(#[from] upwatch_status::StatusError),

    #[error("file watcher error: {0}")]
    FsWatch(#[from] notify::Error),

    #[error("event channel closed")]
    ChannelClosed,
}
