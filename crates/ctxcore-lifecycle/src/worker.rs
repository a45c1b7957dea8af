//! The indexer abstraction (spec.md §1 names the indexer an out-of-scope
//! external collaborator; this is the seam the manager drives it through).

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A background indexing job the [`crate::IndexingLifecycleManager`] can
/// start, drive, and cooperatively cancel.
///
/// Implementations should check `cancel.is_cancelled()` at safe points
/// (between files, between batches) and return promptly once set — the
/// manager does not forcibly abort the future.
#[async_trait]
pub trait IndexingWorker: Send + Sync {
    /// Run indexing rooted at `root`. `cancel` is signalled when the host
    /// calls [`crate::IndexingLifecycleManager::cancel`]. The `Err` string is
    /// recorded verbatim as the session's error message.
    async fn run(&self, root: &str, cancel: CancellationToken) -> Result<(), String>;
}
