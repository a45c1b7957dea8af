//! The Auto-Indexing Lifecycle Manager state machine (spec.md §4.1).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use ctxcore_domain::constants::STATUS_CHANNEL_CAPACITY;
use ctxcore_domain::value_objects::{IndexingSession, IndexingStatus, SessionId};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::config::IndexingConfig;
use crate::worker::IndexingWorker;

/// Coordinates a single background indexing session at a time: `start`,
/// `cancel`, and the wait/observer API of spec.md §4.1.
///
/// Mutating state (the session snapshot) is guarded by a `RwLock`; the
/// `running`/`cancelling`/`closed` flags are independent atomics so `start`
/// and `cancel` never block on the lock held by a concurrent reader.
pub struct IndexingLifecycleManager {
    worker: Arc<dyn IndexingWorker>,
    session: RwLock<Option<IndexingSession>>,
    status_tx: broadcast::Sender<IndexingStatus>,
    done_tx: watch::Sender<Option<IndexingStatus>>,
    cancel_token: Mutex<CancellationToken>,
    running: AtomicBool,
    cancelling: AtomicBool,
    closed: AtomicBool,
    default_timeout_ms: AtomicU64,
}

impl IndexingLifecycleManager {
    /// Build a manager driving the given worker. Returned as an `Arc`
    /// because `start` spawns a task that outlives the call.
    pub fn new(worker: Arc<dyn IndexingWorker>) -> Arc<Self> {
        let (status_tx, _) = broadcast::channel(STATUS_CHANNEL_CAPACITY);
        let (done_tx, _) = watch::channel(None);
        Arc::new(Self {
            worker,
            session: RwLock::new(None),
            status_tx,
            done_tx,
            cancel_token: Mutex::new(CancellationToken::new()),
            running: AtomicBool::new(false),
            cancelling: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            default_timeout_ms: AtomicU64::new(IndexingConfig::default().timeout.as_millis() as u64),
        })
    }

    /// Start a new session rooted at `root`. Returns `false` (`alreadyRunning`)
    /// if a session is already running, or if the manager was `close()`d.
    pub fn start(self: &Arc<Self>, root: impl Into<String>, config: IndexingConfig) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            tracing::warn!("start() called on a closed lifecycle manager");
            return false;
        }
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("start() called while a session is already running");
            return false;
        }
        self.cancelling.store(false, Ordering::SeqCst);
        self.default_timeout_ms
            .store(config.timeout.as_millis() as u64, Ordering::SeqCst);

        let root = root.into();
        let token = CancellationToken::new();
        *self.cancel_token.lock().expect("cancel_token lock poisoned") = token.clone();

        let initial_status = if config.startup_delay_ms > 0 {
            IndexingStatus::Waiting
        } else {
            IndexingStatus::Indexing
        };
        let mut session = IndexingSession::new(root.clone(), Utc::now());
        session.status = initial_status;
        let session_id = session.session_id;
        *self.session.write().expect("session lock poisoned") = Some(session);

        tracing::info!(%session_id, root = %root, status = ?initial_status, "indexing session started");
        self.publish_status(initial_status);

        let manager = Arc::clone(self);
        tokio::spawn(async move { manager.drive(root, config, token).await });
        true
    }

    async fn drive(self: Arc<Self>, root: String, config: IndexingConfig, token: CancellationToken) {
        if config.startup_delay_ms > 0 {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(config.startup_delay_ms)) => {}
                _ = token.cancelled() => {
                    self.finish(IndexingStatus::Cancelled, None);
                    return;
                }
            }
            if self.cancelling.load(Ordering::SeqCst) {
                self.finish(IndexingStatus::Cancelled, None);
                return;
            }
            self.set_status(IndexingStatus::Indexing);
        }

        let result = self.worker.run(&root, token).await;

        if self.cancelling.load(Ordering::SeqCst) {
            self.finish(IndexingStatus::Cancelled, None);
            return;
        }
        match result {
            Ok(()) => self.finish(IndexingStatus::Completed, None),
            Err(message) => self.finish(IndexingStatus::Failed, Some(message)),
        }
    }

    fn set_status(&self, status: IndexingStatus) {
        if let Some(session) = self.session.write().expect("session lock poisoned").as_mut() {
            session.status = status;
        }
        self.publish_status(status);
    }

    fn finish(&self, status: IndexingStatus, error_message: Option<String>) {
        {
            let mut guard = self.session.write().expect("session lock poisoned");
            if let Some(session) = guard.as_mut() {
                session.status = status;
                session.error_message = error_message.clone();
                if status == IndexingStatus::Completed {
                    session.progress = 1.0;
                }
            }
        }
        self.running.store(false, Ordering::SeqCst);
        tracing::info!(status = ?status, error = ?error_message, "indexing session finished");
        self.publish_status(status);
    }

    /// Publishes to the status/done channels, observing the `closed` gate
    /// (spec.md §5: the channels must never be written to after `close()`).
    fn publish_status(&self, status: IndexingStatus) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.status_tx.send(status);
        if status.is_terminal() {
            let _ = self.done_tx.send(Some(status));
        }
    }

    /// Request cancellation of the running session. Returns `false` if no
    /// session is running, or cancellation was already requested.
    pub fn cancel(&self) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        if self.cancelling.swap(true, Ordering::SeqCst) {
            return false;
        }
        tracing::info!("cancellation requested");
        self.cancel_token
            .lock()
            .expect("cancel_token lock poisoned")
            .cancel();
        true
    }

    /// Wait until the session reaches a terminal state, or `timeout` (or the
    /// session's configured default) elapses.
    pub async fn wait_for_completion(&self, timeout: Option<Duration>) -> (IndexingStatus, bool) {
        self.wait_for_status(
            &[
                IndexingStatus::Completed,
                IndexingStatus::Failed,
                IndexingStatus::Cancelled,
            ],
            timeout,
        )
        .await
    }

    /// Wait until `status()` is a member of `targets`, or the timeout
    /// elapses. Returns `(status, true)` on timeout, `(status, false)`
    /// otherwise. Re-reads `status()` directly rather than trusting channel
    /// payloads, since sends are dropped when the channel is full.
    pub async fn wait_for_status(
        &self,
        targets: &[IndexingStatus],
        timeout: Option<Duration>,
    ) -> (IndexingStatus, bool) {
        let budget = timeout.unwrap_or_else(|| {
            Duration::from_millis(self.default_timeout_ms.load(Ordering::SeqCst))
        });
        let mut rx = self.status_tx.subscribe();
        let deadline = Instant::now() + budget;

        loop {
            let current = self.status();
            if targets.contains(&current) {
                return (current, false);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return (current, true);
            }
            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Ok(_status)) => continue,
                Ok(Err(broadcast::error::RecvError::Lagged(_))) => continue,
                Ok(Err(broadcast::error::RecvError::Closed)) => return (self.status(), false),
                Err(_elapsed) => return (self.status(), true),
            }
        }
    }

    /// Current status; `Idle` if `start()` was never called.
    pub fn status(&self) -> IndexingStatus {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map_or(IndexingStatus::Idle, |s| s.status)
    }

    /// Progress estimate in `[0, 1]`, as last reported.
    pub fn progress(&self) -> f64 {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map_or(0.0, |s| s.progress)
    }

    /// Identifier of the most recently started session, if any.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.session_id)
    }

    /// Root path passed to the most recent `start()`, if any.
    pub fn root_path(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.root_path.clone())
    }

    /// Verbatim error message, set only once status is `Failed`.
    pub fn error(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .and_then(|s| s.error_message.clone())
    }

    /// Wall-clock time the current session was started.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.start_time)
    }

    /// Whether a session is currently running (not yet in a terminal state).
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Whether cancellation has been requested for the running session.
    pub fn is_cancelled(&self) -> bool {
        self.cancelling.load(Ordering::SeqCst)
    }

    /// Subscribe to every status change (spec.md §4.1's buffered status
    /// channel). Sends are dropped if the receiver falls behind; use the
    /// observer getters, not this stream, as the source of truth.
    pub fn subscribe_status(&self) -> broadcast::Receiver<IndexingStatus> {
        self.status_tx.subscribe()
    }

    /// Subscribe to the done channel, which carries the terminal status once
    /// the session reaches one (spec.md §4.1's buffered done channel).
    pub fn subscribe_done(&self) -> watch::Receiver<Option<IndexingStatus>> {
        self.done_tx.subscribe()
    }

    /// Idempotently close the manager: no further `start()` succeeds, and
    /// the notification channels stop accepting sends.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!("lifecycle manager closed");
    }
}
