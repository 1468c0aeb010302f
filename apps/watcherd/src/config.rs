//! Daemon configuration management.
//!
//! Configuration is stored as TOML at `~/.config/upwatch/watcherd.toml`
//! (override with `UPWATCH_CONFIG`). A missing file is replaced with
//! defaults matching the system updater's conventional paths.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use upwatch_status::StatusFormat;
use upwatch_watcher::{CheckGate, Templates, WatcherConfig};

/// On-disk daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the status file written by the system updater.
    #[serde(default = "default_status_path")]
    pub status_path: String,

    /// Status file format: "json" or "legacy".
    #[serde(default)]
    pub legacy_format: bool,

    /// Minimum seconds between automatic check requests.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Poll interval in milliseconds (fallback and heartbeat).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Allow automatic checks while a download or install is in flight.
    #[serde(default)]
    pub check_during_activity: bool,

    /// Command to run for "check for updates" requests.
    #[serde(default = "default_check_command")]
    pub check_command: String,

    /// Path of the notification FIFO; empty disables notifications.
    #[serde(default = "default_notification_fifo")]
    pub notification_fifo: String,

    /// Notification message templates.
    #[serde(default)]
    pub templates: Templates,
}

fn default_status_path() -> String {
    "/var/cache/updater/status.json".into()
}

fn default_cooldown_secs() -> u64 {
    86_400
}

fn default_poll_interval_ms() -> u64 {
    // 10 minutes, same heartbeat the old panel widget used.
    600_000
}

fn default_check_command() -> String {
    "updater check".into()
}

fn default_notification_fifo() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    format!("{home}/.notifications.fifo")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_path: default_status_path(),
            legacy_format: false,
            cooldown_secs: default_cooldown_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            check_during_activity: false,
            check_command: default_check_command(),
            notification_fifo: default_notification_fifo(),
            templates: Templates::default(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Converts the on-disk form into the watcher core's configuration.
    pub fn watcher_config(&self) -> WatcherConfig {
        WatcherConfig {
            status_path: PathBuf::from(&self.status_path),
            status_format: if self.legacy_format {
                StatusFormat::Legacy
            } else {
                StatusFormat::Json
            },
            cooldown: Duration::from_secs(self.cooldown_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            check_gate: if self.check_during_activity {
                CheckGate::Always
            } else {
                CheckGate::OnlyWhenIdle
            },
            templates: self.templates.clone(),
        }
    }
}

/// Returns the configuration file path.
fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("UPWATCH_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home)
        .join(".config")
        .join("upwatch")
        .join("watcherd.toml")
}
