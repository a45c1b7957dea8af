//! Output shapes produced by the expansion engine and hydration driver.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::context_ref::LineRange;
use super::purity::PurityInfo;
use super::symbol::SymbolKind;

/// One hydrated reference: resolved source plus the metadata the expansion
/// engine attached while walking relationship edges outward from it
/// (spec.md §3).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HydratedRef {
    /// Path the source was hydrated from, or the original path of an
    /// external reference that was never read from disk.
    pub file: String,
    /// Resolved symbol name, when one was given or discovered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Role carried over from the originating `ContextRef`, when this ref
    /// was directly requested rather than pulled in by expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Note carried over from the originating `ContextRef`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Hydrated line span, absent for external references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineRange>,
    /// Hydrated source text, possibly reduced by
    /// [`crate::value_objects::context_ref::ReportFormat`]. Empty only when
    /// `is_external` is true.
    #[serde(default)]
    pub source: String,
    /// Symbol kind, when resolved from the index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_type: Option<SymbolKind>,
    /// Declared signature, trimmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Whether the symbol is exported/public, when known.
    #[serde(default)]
    pub is_exported: bool,
    /// Purity metadata, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purity: Option<PurityInfo>,
    /// Whether this reference lives outside the indexed workspace and
    /// therefore has no real source on disk.
    #[serde(default)]
    pub is_external: bool,
    /// Children pulled in by expansion directives, keyed by directive kind
    /// name. Forms a DAG rooted at this ref: no symbol id repeats on any
    /// root-to-leaf path under `callers`/`callees` expansion (spec.md §8
    /// invariant 3).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expanded: BTreeMap<String, Vec<HydratedRef>>,
}

impl HydratedRef {
    /// Approximate token count of `source`, per the `ceil(len/4)` contract
    /// (spec.md §4.2).
    pub fn tokens(&self) -> usize {
        crate::util::approx_tokens(&self.source)
    }
}

/// Aggregate counters the hydration driver accumulates across a manifest run
/// (spec.md §3's `HydratedContext.stats`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HydrationStats {
    /// Top-level references loaded from the filtered manifest.
    pub refs_loaded: usize,
    /// Total symbols hydrated, including expansion children.
    pub symbols_hydrated: usize,
    /// Total expansion directives successfully applied.
    pub expansions_applied: usize,
    /// Total approximate tokens across all hydrated references.
    pub tokens_approx: usize,
    /// Whether the run stopped early because the token budget was reached.
    pub truncated: bool,
}

/// The full result of running the hydration driver over a manifest
/// (spec.md §3).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HydratedContext {
    /// Task description copied from the source manifest.
    pub task: String,
    /// Hydrated top-level references, in filtered-manifest order.
    pub refs: Vec<HydratedRef>,
    /// Non-fatal warnings accumulated during the run (truncation, top-level
    /// hydration failures).
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Run-level counters.
    pub stats: HydrationStats,
}
