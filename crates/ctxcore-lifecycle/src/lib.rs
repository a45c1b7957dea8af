//! # Auto-Indexing Lifecycle Manager
//!
//! A non-blocking state machine that starts, cancels, and awaits a
//! background indexing run while exposing a lock-free-read snapshot of its
//! status to observers (spec.md §4.1).
//!
//! The indexer itself is out of scope (spec.md §1); this crate drives an
//! injected [`IndexingWorker`] instead of assuming a concrete
//! implementation, mirroring the teacher's `ServiceManager` dependency
//! injection idiom.

mod config;
mod manager;
mod worker;

pub use config::IndexingConfig;
pub use manager::IndexingLifecycleManager;
pub use worker::IndexingWorker;
