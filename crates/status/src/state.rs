//! Canonical presentation states of the external updater.

use serde::{Deserialize, Serialize};

/// The five states the watcher reasons about.
///
/// The external writer uses kebab-case strings; anything it writes that we
/// don't recognize folds to [`UpdateState::NoUpdates`] rather than failing
/// the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateState {
    #[default]
    #[serde(rename = "no-updates")]
    NoUpdates,
    #[serde(rename = "updates-available")]
    UpdatesAvailable,
    #[serde(rename = "downloading-updates")]
    DownloadingUpdates,
    #[serde(rename = "updates-downloaded")]
    UpdatesDownloaded,
    #[serde(rename = "installing-updates")]
    InstallingUpdates,
}

impl UpdateState {
    /// Maps a raw state string from the status file to a canonical state.
    ///
    /// Unknown strings map to `NoUpdates`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "updates-available" => Self::UpdatesAvailable,
            "downloading-updates" => Self::DownloadingUpdates,
            "updates-downloaded" => Self::UpdatesDownloaded,
            "installing-updates" => Self::InstallingUpdates,
            _ => Self::NoUpdates,
        }
    }

    /// The raw string the external writer uses for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoUpdates => "no-updates",
            Self::UpdatesAvailable => "updates-available",
            Self::DownloadingUpdates => "downloading-updates",
            Self::UpdatesDownloaded => "updates-downloaded",
            Self::InstallingUpdates => "installing-updates",
        }
    }

    /// Whether the updater is between operations.
    ///
    /// Used to gate automatic re-checks so an in-progress download or
    /// install is never interrupted by a redundant check.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::NoUpdates)
    }

    /// Whether this state asks the user to act (download or install).
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::UpdatesAvailable | Self::UpdatesDownloaded)
    }
}

impl std::fmt::Display for UpdateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
