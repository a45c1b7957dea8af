//! Strong-typed identifiers.
//!
//! `SymbolId` is a plain string newtype rather than a UUID: symbol identity
//! is minted by the external Symbol Index (out of scope for this core), so
//! the only capability required here is an orderable, hashable, serializable
//! handle — not the ability to generate one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, index-assigned identifier for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(String);

impl SymbolId {
    /// Wrap a raw identifier string as assigned by the Symbol Index.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the underlying identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SymbolId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Opaque, index-assigned identifier for a file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(String);

impl FileId {
    /// Wrap a raw identifier string as assigned by the Symbol Index.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the underlying identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier for a background indexing session, generated by the lifecycle
/// manager at `start()` time rather than by the external indexer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}
