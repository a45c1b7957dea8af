//! Lifecycle record for a single background indexing run (spec.md §3, §4.1).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SessionId;

/// A status in the indexing state machine (spec.md §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingStatus {
    /// No indexing has ever run, or the manager was reset.
    Idle,
    /// `start()` was called with a non-zero startup delay still elapsing.
    Waiting,
    /// The injected worker is running.
    Indexing,
    /// The worker finished successfully. Terminal.
    Completed,
    /// The worker returned an error. Terminal.
    Failed,
    /// `cancel()` was requested and the worker observed it. Terminal.
    Cancelled,
}

impl IndexingStatus {
    /// Terminal statuses admit no further transitions without a fresh
    /// `start()` (spec.md §4.1).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Snapshot of one indexing session's mutable state, owned exclusively by
/// the Lifecycle Manager (spec.md §3's ownership rule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexingSession {
    /// Identifier generated at `start()` time.
    pub session_id: SessionId,
    /// Root path passed to `start()`.
    pub root_path: String,
    /// Current status.
    pub status: IndexingStatus,
    /// Progress estimate in `[0, 1]`, as reported by the worker.
    pub progress: f64,
    /// Verbatim error message, set only when `status == Failed`.
    pub error_message: Option<String>,
    /// Wall-clock time `start()` was called.
    pub start_time: DateTime<Utc>,
}

impl IndexingSession {
    /// Begin a new session in the `Idle`/`Waiting` state appropriate for the
    /// given startup delay; callers transition it further as the state
    /// machine advances.
    pub fn new(root_path: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            session_id: SessionId::new(),
            root_path: root_path.into(),
            status: IndexingStatus::Idle,
            progress: 0.0,
            error_message: None,
            start_time,
        }
    }
}
