//! Sink implementations wiring the watcher core to the desktop.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use upwatch_watcher::{CheckRequestSink, Notification, NotificationSink, SinkError};

/// Payload accepted by the desktop notification FIFO.
#[derive(Debug, Serialize)]
struct FifoPayload<'a> {
    title: &'a str,
    byline: &'a str,
    image: &'a str,
    sound: Option<&'a str>,
    #[serde(rename = "type")]
    kind: &'a str,
    command: &'a str,
}

/// Delivers notifications by writing one JSON line to a named pipe that the
/// desktop notification UI reads.
pub struct FifoNotificationSink {
    path: PathBuf,
}

impl FifoNotificationSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NotificationSink for FifoNotificationSink {
    fn send(&mut self, notification: &Notification) -> Result<(), SinkError> {
        let payload = FifoPayload {
            title: &notification.title,
            byline: &notification.byline,
            image: &notification.image,
            sound: None,
            kind: "small",
            command: &notification.command,
        };
        let mut line = serde_json::to_string(&payload)?;
        line.push('\n');

        let mut pipe = std::fs::OpenOptions::new().write(true).open(&self.path)?;
        pipe.write_all(line.as_bytes())?;

        tracing::debug!(kind = ?notification.kind, "notification dispatched");
        Ok(())
    }
}

/// Runs the configured updater check command when a check is requested.
///
/// The command carries its own privilege setup (sudo rules, polkit); this
/// sink only launches it and never waits for the result.
pub struct CommandCheckSink {
    command: String,
}

impl CommandCheckSink {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl CheckRequestSink for CommandCheckSink {
    fn request_check(&mut self) -> Result<(), SinkError> {
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err("check command is empty".into());
        };

        let child = tokio::process::Command::new(program)
            .args(parts)
            .spawn()?;

        tracing::info!(command = %self.command, pid = ?child.id(), "check command launched");
        // Fire and forget; the runtime reaps the child.
        drop(child);
        Ok(())
    }
}
