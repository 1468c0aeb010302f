//! Application orchestrator — wires the watcher core to its collaborators.

use std::path::Path;

use upwatch_watcher::{FsWatcher, NullSink, Watcher};

use crate::config::Config;
use crate::sinks::{CommandCheckSink, FifoNotificationSink};

/// Runs the watcher until shutdown is requested.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let watcher_config = config.watcher_config();
    let status_path = watcher_config.status_path.clone();

    // -- Sinks --
    let notifications: Box<dyn upwatch_watcher::NotificationSink> =
        if config.notification_fifo.is_empty() {
            Box::new(NullSink)
        } else {
            Box::new(FifoNotificationSink::new(&config.notification_fifo))
        };
    let checks = Box::new(CommandCheckSink::new(&config.check_command));

    // -- Watcher core --
    let (watcher, handle) = Watcher::new(watcher_config, notifications, checks);

    // -- Filesystem change events --
    // A failed start is non-fatal: the poll heartbeat still drives cycles.
    let _fs_watch = match FsWatcher::start(Path::new(&status_path), handle.sender()) {
        Ok(fs) => Some(fs),
        Err(e) => {
            tracing::warn!(error = %e, "file watching unavailable, running poll-only");
            None
        }
    };

    let task = tokio::spawn(watcher.run());

    tracing::info!("watcher ready");

    // -- Main loop: wait for shutdown --
    tokio::signal::ctrl_c().await?;
    tracing::info!("SIGINT received, shutting down");

    // Graceful: the in-flight cycle finishes before the loop exits.
    handle.shutdown().await?;
    task.await?;

    Ok(())
}
