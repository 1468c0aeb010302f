//! Watcher configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use upwatch_status::{StatusFormat, StatusSource};

use crate::notification::Templates;

/// Which states permit an automatic cooldown-expiry check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckGate {
    /// Check whenever the cooldown expires, regardless of state.
    Always,
    /// Only check while no download or install is in flight.
    #[default]
    OnlyWhenIdle,
}

/// Configuration for one watcher instance.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Path to the externally written status file.
    pub status_path: PathBuf,
    /// On-disk format of the status file.
    pub status_format: StatusFormat,
    /// Minimum time between automatic check requests.
    pub cooldown: Duration,
    /// Fallback poll interval when file-change notification is unavailable,
    /// and heartbeat when it is.
    pub poll_interval: Duration,
    /// Gating policy for automatic checks.
    pub check_gate: CheckGate,
    /// Notification templates per kind.
    pub templates: Templates,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            status_path: PathBuf::from("/var/cache/updater/status.json"),
            status_format: StatusFormat::Json,
            cooldown: Duration::from_secs(86_400),
            poll_interval: Duration::from_secs(600),
            check_gate: CheckGate::OnlyWhenIdle,
            templates: Templates::default(),
        }
    }
}

impl WatcherConfig {
    /// Profile matching the legacy key=value status file: weekly cooldown,
    /// unconditional checks, no notifications.
    pub fn legacy(status_path: impl Into<PathBuf>) -> Self {
        Self {
            status_path: status_path.into(),
            status_format: StatusFormat::Legacy,
            cooldown: Duration::from_secs(604_800),
            poll_interval: Duration::from_secs(600),
            check_gate: CheckGate::Always,
            templates: Templates::none(),
        }
    }

    pub fn source(&self) -> StatusSource {
        StatusSource::new(&self.status_path, self.status_format)
    }
}
