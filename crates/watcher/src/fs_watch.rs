//! Filesystem adapter feeding change events into the watcher loop.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{EventKind, RecursiveMode, Watcher as _};
use tokio::sync::mpsc;

use crate::service::WatcherEvent;
use crate::WatchError;

/// Watches the status file's directory and forwards relevant change events
/// as [`WatcherEvent::StatusChanged`].
///
/// Watching the parent directory rather than the file itself means the
/// watcher also sees the file being created for the first time, and
/// survives writers that replace the file by rename. Dropping the value
/// stops the watch; if starting it fails the service still works in
/// poll-only mode.
pub struct FsWatcher {
    _watcher: notify::RecommendedWatcher,
}

impl FsWatcher {
    pub fn start(
        status_path: &Path,
        tx: mpsc::Sender<WatcherEvent>,
    ) -> Result<Self, WatchError> {
        let file_name: OsString = status_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        let dir = status_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut watcher =
            notify::recommended_watcher(move |result: Result<notify::Event, notify::Error>| {
                match result {
                    Ok(event) => {
                        if !matches!(
                            event.kind,
                            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                        ) {
                            return;
                        }
                        if !event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == Some(file_name.as_os_str()))
                        {
                            return;
                        }
                        // A full buffer already guarantees a pending cycle,
                        // so dropping the event loses nothing.
                        let _ = tx.try_send(WatcherEvent::StatusChanged);
                    }
                    Err(e) => tracing::warn!(error = %e, "file watcher error"),
                }
            })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %dir.display(), "watching status directory");

        Ok(Self { _watcher: watcher })
    }
}
