//! Symbol and file shapes returned by the external Symbol Index.
//!
//! These mirror what `SymbolIndex::get_enhanced_symbol`/`get_file_info`
//! typically expose, without carrying the index's own storage concerns.

use serde::{Deserialize, Serialize};

use super::ids::{FileId, SymbolId};

/// The syntactic category of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Free function.
    Function,
    /// Method with a receiver.
    Method,
    /// Type definition (struct, class, type alias).
    Type,
    /// Interface or trait definition.
    Interface,
    /// Enum definition.
    Enum,
    /// Package-level or global variable/constant.
    Variable,
    /// Any symbol kind not covered above.
    Other,
}

/// A single symbol resolved from the external Symbol Index
/// (`SymbolIndex::get_enhanced_symbol`, spec.md §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Index-assigned identifier.
    pub id: SymbolId,
    /// Symbol's declared name.
    pub name: String,
    /// Syntactic category.
    pub kind: SymbolKind,
    /// File the symbol is declared in.
    pub file_id: FileId,
    /// 1-indexed line the declaration starts on.
    pub start_line: usize,
    /// 1-indexed line the declaration ends on (inclusive).
    pub end_line: usize,
    /// Declared receiver type, for methods; absent for free functions or
    /// when the index doesn't track receivers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_type: Option<String>,
    /// Declared signature, when the index captured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Whether the symbol is exported/public, when the index tracks this.
    #[serde(default)]
    pub is_exported: bool,
}

/// File-level metadata surfaced by `SymbolIndex::get_file_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Index-assigned identifier.
    pub id: FileId,
    /// Filesystem path, relative to the indexed root.
    pub path: String,
    /// Language family the index classified this file as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
