fn main() {
    println!("Run `cargo test -p status-compat` to execute status compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use upwatch_status::{read_status, read_status_legacy, StatusFormat, UpdateState};
    use upwatch_watcher::{
        CheckGate, CheckRequestSink, Notification, NotificationKind, NotificationSink,
        SinkError, Templates, Watcher, WatcherConfig, WatcherEvent,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    // --- Fixture compatibility: both status formats produced by real updaters ---

    #[test]
    fn fixture_json_status() {
        let record = read_status(&fixtures_dir().join("status.json")).unwrap();
        assert_eq!(record.state, UpdateState::UpdatesAvailable);
        assert_eq!(record.last_check, 1_409_321_389);
        assert_eq!(record.last_update, 1_405_419_523);
    }

    #[test]
    fn fixture_legacy_status() {
        let record = read_status_legacy(&fixtures_dir().join("status")).unwrap();
        assert_eq!(record.state, UpdateState::UpdatesAvailable);
        assert_eq!(record.last_check, 1_409_321_389);
        assert_eq!(record.last_update, 1_405_419_523);
    }

    #[test]
    fn fixture_json_and_legacy_agree() {
        let json = read_status(&fixtures_dir().join("status.json")).unwrap();
        let legacy = read_status_legacy(&fixtures_dir().join("status")).unwrap();
        assert_eq!(json, legacy);
    }

    #[test]
    fn fixture_partial_json_degrades_fields() {
        // Wrong-typed last_check degrades to 0; the read still succeeds.
        let record = read_status(&fixtures_dir().join("status_partial.json")).unwrap();
        assert_eq!(record.state, UpdateState::InstallingUpdates);
        assert_eq!(record.last_check, 0);
    }

    // --- End-to-end watcher runs over a temp status file ---

    #[derive(Clone, Default)]
    struct RecordingNotifier(Arc<Mutex<Vec<NotificationKind>>>);

    impl NotificationSink for RecordingNotifier {
        fn send(&mut self, notification: &Notification) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(notification.kind);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CountingChecker(Arc<AtomicUsize>);

    impl CheckRequestSink for CountingChecker {
        fn request_check(&mut self) -> Result<(), SinkError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn now_epoch() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }

    fn config(path: &std::path::Path) -> WatcherConfig {
        WatcherConfig {
            status_path: path.to_path_buf(),
            status_format: StatusFormat::Json,
            cooldown: Duration::from_secs(86_400),
            poll_interval: Duration::from_secs(3600),
            check_gate: CheckGate::OnlyWhenIdle,
            templates: Templates::default(),
        }
    }

    fn write_state(path: &std::path::Path, state: &str) {
        let now = now_epoch();
        std::fs::write(
            path,
            format!(r#"{{"state": "{state}", "last_check": {now}, "last_update": 0}}"#),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn full_lifecycle_fires_both_notifications_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        write_state(&path, "no-updates");

        let notifier = RecordingNotifier::default();
        let kinds = notifier.0.clone();
        let checker = CountingChecker::default();
        let (watcher, handle) = Watcher::new(
            config(&path),
            Box::new(notifier),
            Box::new(checker),
        );
        let task = tokio::spawn(watcher.run());

        for state in [
            "updates-available",
            "downloading-updates",
            "updates-downloaded",
            "installing-updates",
            "no-updates",
        ] {
            write_state(&path, state);
            handle.sender().send(WatcherEvent::StatusChanged).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert_eq!(
            *kinds.lock().unwrap(),
            vec![
                NotificationKind::UpdatesAvailable,
                NotificationKind::UpdatesDownloaded
            ]
        );
    }

    #[tokio::test]
    async fn steady_state_rereads_stay_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        write_state(&path, "updates-available");

        let notifier = RecordingNotifier::default();
        let kinds = notifier.0.clone();
        let (watcher, handle) = Watcher::new(
            config(&path),
            Box::new(notifier),
            Box::new(CountingChecker::default()),
        );
        let task = tokio::spawn(watcher.run());
        tokio::time::sleep(Duration::from_millis(50)).await;

        for _ in 0..5 {
            handle.sender().send(WatcherEvent::StatusChanged).await.unwrap();
            tokio::time::sleep(Duration::from_millis(30)).await;
        }

        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert_eq!(
            *kinds.lock().unwrap(),
            vec![NotificationKind::UpdatesAvailable]
        );
    }

    #[tokio::test]
    async fn legacy_profile_never_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status");
        std::fs::write(
            &path,
            format!("last_check={}\nupdate_available=1\n", now_epoch()),
        )
        .unwrap();

        let notifier = RecordingNotifier::default();
        let kinds = notifier.0.clone();
        let mut legacy = WatcherConfig::legacy(&path);
        legacy.poll_interval = Duration::from_secs(3600);
        let (watcher, handle) = Watcher::new(
            legacy,
            Box::new(notifier),
            Box::new(CountingChecker::default()),
        );
        let task = tokio::spawn(watcher.run());

        handle.sender().send(WatcherEvent::StatusChanged).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        handle.shutdown().await.unwrap();
        task.await.unwrap();

        // The edge happened but the legacy profile has no templates.
        assert!(kinds.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn manual_check_works_while_cooldown_active() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        write_state(&path, "downloading-updates");

        let checker = CountingChecker::default();
        let count = checker.0.clone();
        let (watcher, handle) = Watcher::new(
            config(&path),
            Box::new(RecordingNotifier::default()),
            Box::new(checker),
        );
        let task = tokio::spawn(watcher.run());
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Automatic checks are blocked twice over: fresh last_check and a
        // non-idle state. The user can still force one.
        assert_eq!(count.load(Ordering::SeqCst), 0);
        handle.request_check_now().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn deleted_status_file_resets_to_no_updates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        write_state(&path, "updates-available");

        let notifier = RecordingNotifier::default();
        let kinds = notifier.0.clone();
        let (watcher, handle) = Watcher::new(
            config(&path),
            Box::new(notifier),
            Box::new(CountingChecker::default()),
        );
        let task = tokio::spawn(watcher.run());
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Removing the file is a valid "no updates" signal, then the state
        // coming back is a fresh edge.
        std::fs::remove_file(&path).unwrap();
        handle.sender().send(WatcherEvent::StatusChanged).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        write_state(&path, "updates-available");
        handle.sender().send(WatcherEvent::StatusChanged).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert_eq!(
            *kinds.lock().unwrap(),
            vec![
                NotificationKind::UpdatesAvailable,
                NotificationKind::UpdatesAvailable
            ]
        );
    }
}
