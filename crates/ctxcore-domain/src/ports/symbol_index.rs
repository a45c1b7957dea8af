//! The external Symbol Index collaborator (spec.md §6).
//!
//! The index itself — and the tree-sitter-driven process that populates it —
//! is out of scope for this core (spec.md §1). This port names only the
//! capability set the expansion engine consumes, mirroring the teacher's
//! convention that every external collaborator is an `#[async_trait]`
//! `Send + Sync` port (`ContextServiceInterface`, `IndexingServiceInterface`).

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{FileId, FileInfo, PurityInfo, Symbol, SymbolId};

/// Read-only accessor for a persistent cross-file symbol index.
///
/// Implementations are shared across concurrent hydration requests for the
/// server's lifetime (spec.md §3's ownership rule) and must not block the
/// caller beyond ordinary I/O.
#[async_trait]
pub trait SymbolIndex: Send + Sync {
    /// Look up symbols by exact name. When multiple matches exist, callers
    /// select the first in the returned order (spec.md §4.3.1) — this port
    /// is responsible for making that order deterministic.
    async fn find_symbols_by_name(&self, name: &str) -> Result<Vec<Symbol>>;

    /// Symbols whose bodies reference `id`.
    async fn get_callers(&self, id: &SymbolId) -> Result<Vec<SymbolId>>;

    /// Symbols `id`'s body references.
    async fn get_callees(&self, id: &SymbolId) -> Result<Vec<SymbolId>>;

    /// Types implementing the interface `id`, each with a confidence score
    /// in `[0, 1]`. Not required to be sorted; callers sort descending.
    async fn get_implementors_with_quality(&self, id: &SymbolId) -> Result<Vec<(SymbolId, f64)>>;

    /// Interfaces implemented by the type `id`, each with a confidence
    /// score in `[0, 1]`. Not required to be sorted; callers sort
    /// descending.
    async fn get_implemented_interfaces_with_quality(
        &self,
        id: &SymbolId,
    ) -> Result<Vec<(SymbolId, f64)>>;

    /// Base types `id` extends.
    async fn get_base_types(&self, id: &SymbolId) -> Result<Vec<SymbolId>>;

    /// Types that extend `id`.
    async fn get_derived_types(&self, id: &SymbolId) -> Result<Vec<SymbolId>>;

    /// Full symbol record for `id`.
    async fn get_enhanced_symbol(&self, id: &SymbolId) -> Result<Symbol>;

    /// File metadata for `file_id`.
    async fn get_file_info(&self, file_id: &FileId) -> Result<FileInfo>;

    /// Optional per-symbol side-effect record. The index is not required to
    /// support this; the default implementation reports no opinion, which
    /// is the idiomatic-Rust equivalent of the corpus's capability feature
    /// detection for a single optional method.
    async fn get_side_effect_info(&self, _id: &SymbolId) -> Result<Option<PurityInfo>> {
        Ok(None)
    }
}
