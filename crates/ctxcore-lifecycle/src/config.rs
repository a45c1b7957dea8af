//! Per-`start()` lifecycle configuration (spec.md §4.1, §5, §6).

use std::time::Duration;

use ctxcore_domain::constants::DEFAULT_INDEXING_TIMEOUT_SECS;

/// Configuration passed to [`crate::IndexingLifecycleManager::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexingConfig {
    /// Delay before transitioning `waiting -> indexing`. Zero skips the
    /// `waiting` state entirely (spec.md §4.1).
    pub startup_delay_ms: u64,
    /// Default timeout used by `waitForCompletion`/`waitForStatus` calls
    /// that pass none, for sessions started with this config.
    pub timeout: Duration,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: 0,
            timeout: Duration::from_secs(DEFAULT_INDEXING_TIMEOUT_SECS),
        }
    }
}
