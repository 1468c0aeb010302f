//! The watcher service loop.
//!
//! One instance, one inbound event stream, one cycle at a time. Cycles are
//! synchronous and run to completion, so shutdown can never abandon a cycle
//! mid-mutation and overlapping cycles can't interleave edge detection.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use upwatch_status::StatusSource;

use crate::config::WatcherConfig;
use crate::context::WatcherContext;
use crate::notification::Templates;
use crate::scheduler::CheckScheduler;
use crate::sink::{CheckRequestSink, NotificationSink};
use crate::WatchError;

/// Inbound events consumed by the watcher loop, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherEvent {
    /// The status source changed on disk.
    StatusChanged,
    /// Heartbeat from an external poll timer.
    PollTick,
    /// Explicit user request to check for updates now, bypassing cooldown.
    CheckRequested,
    /// Stop the loop after the current cycle.
    Shutdown,
}

/// Cloneable handle for feeding events to a running watcher.
#[derive(Debug, Clone)]
pub struct WatcherHandle {
    tx: mpsc::Sender<WatcherEvent>,
}

impl WatcherHandle {
    /// Requests an update check regardless of cooldown state.
    pub async fn request_check_now(&self) -> Result<(), WatchError> {
        self.tx
            .send(WatcherEvent::CheckRequested)
            .await
            .map_err(|_| WatchError::ChannelClosed)
    }

    /// Asks the loop to stop once queued events are handled.
    pub async fn shutdown(&self) -> Result<(), WatchError> {
        self.tx
            .send(WatcherEvent::Shutdown)
            .await
            .map_err(|_| WatchError::ChannelClosed)
    }

    /// Raw sender for event producers such as the filesystem adapter.
    pub fn sender(&self) -> mpsc::Sender<WatcherEvent> {
        self.tx.clone()
    }
}

/// The watcher service. Owns the context; nothing else mutates it.
pub struct Watcher {
    ctx: WatcherContext,
    source: StatusSource,
    scheduler: CheckScheduler,
    templates: Templates,
    poll_interval: std::time::Duration,
    notifications: Box<dyn NotificationSink>,
    checks: Box<dyn CheckRequestSink>,
    rx: mpsc::Receiver<WatcherEvent>,
    cancel: CancellationToken,
}

impl Watcher {
    /// Builds a watcher from config and its two collaborator sinks.
    pub fn new(
        config: WatcherConfig,
        notifications: Box<dyn NotificationSink>,
        checks: Box<dyn CheckRequestSink>,
    ) -> (Self, WatcherHandle) {
        let (tx, rx) = mpsc::channel(64);
        let watcher = Self {
            ctx: WatcherContext::new(),
            source: config.source(),
            scheduler: CheckScheduler::new(config.cooldown, config.check_gate),
            templates: config.templates,
            poll_interval: config.poll_interval,
            notifications,
            checks,
            rx,
            cancel: CancellationToken::new(),
        };
        (watcher, WatcherHandle { tx })
    }

    /// Token that aborts the loop from the host side. The in-flight cycle
    /// still finishes; only queued events are dropped.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the dispatcher loop until shutdown or cancellation.
    ///
    /// The poll interval doubles as the startup read: the first tick fires
    /// immediately, so the context reflects the on-disk status right away
    /// even when no change event ever arrives.
    pub async fn run(mut self) {
        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::info!(
            path = %self.source.path.display(),
            poll_interval = ?self.poll_interval,
            "watcher started"
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = poll.tick() => self.cycle(),
                event = self.rx.recv() => {
                    match event {
                        Some(event) => {
                            if !self.dispatch(event) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        tracing::info!("watcher stopped");
    }

    /// Handles one event; returns false when the loop should stop.
    fn dispatch(&mut self, event: WatcherEvent) -> bool {
        match event {
            WatcherEvent::StatusChanged | WatcherEvent::PollTick => {
                // Coalesce a burst of change events into a single cycle.
                let mut trailing = None;
                while let Ok(next) = self.rx.try_recv() {
                    match next {
                        WatcherEvent::StatusChanged | WatcherEvent::PollTick => {}
                        other => {
                            trailing = Some(other);
                            break;
                        }
                    }
                }
                self.cycle();
                match trailing {
                    Some(event) => self.dispatch(event),
                    None => true,
                }
            }
            WatcherEvent::CheckRequested => {
                // Explicit user action: no cooldown, no state mutation.
                self.request_check();
                true
            }
            WatcherEvent::Shutdown => false,
        }
    }

    /// One read-decide-act cycle.
    fn cycle(&mut self) {
        let record = match self.source.load() {
            Ok(record) => record,
            Err(e) => {
                // Garbage data must not fake a transition.
                tracing::warn!(error = %e, "status read failed, keeping previous state");
                return;
            }
        };

        let transition = self.ctx.apply(&record);
        if transition.changed() {
            tracing::info!(from = %transition.from, to = %transition.to, "update state changed");
        }

        if let Some(kind) = transition.notification() {
            if let Some(notification) = self.templates.resolve(kind) {
                if let Err(e) = self.notifications.send(&notification) {
                    tracing::warn!(error = %e, "notification sink failed");
                }
            }
        }

        if self.scheduler.should_trigger(now_epoch(), &self.ctx) {
            self.request_check();
        }
    }

    fn request_check(&mut self) {
        match self.checks.request_check() {
            // Only a delivered request arms the local cooldown guard.
            Ok(()) => self.ctx.mark_check_requested(),
            Err(e) => tracing::warn!(error = %e, "check request sink failed"),
        }
    }
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
