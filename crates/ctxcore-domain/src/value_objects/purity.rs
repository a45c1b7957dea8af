//! Purity annotations carried alongside hydrated references.
//!
//! The expansion engine never infers side effects from source text — this
//! level is either supplied by the Symbol Index via
//! [`crate::ports::SymbolIndex::get_side_effect_info`], or synthesized for
//! external-call stubs via [`PurityInfo::external_call`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Coarse side-effect classification for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurityLevel {
    /// No side effects detected by the index.
    Pure,
    /// Side effects detected (I/O, mutation of shared state, etc.).
    SideEffecting,
    /// The index has no opinion; this core made no attempt to infer one.
    #[default]
    Unknown,
    /// The symbol lives outside the indexed workspace.
    ExternalDependency,
}

/// Purity metadata attached to a hydrated reference (spec.md §3).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PurityInfo {
    /// Convenience flag equivalent to `level == Pure`.
    pub is_pure: bool,
    /// Coarse classification.
    pub level: PurityLevel,
    /// Confidence score in `[0, 1]`, as reported by the index.
    pub score: f64,
    /// Free-form category tags, e.g. `"external_call"` for synthesized
    /// external-callee stubs (see [`crate::constants::PURITY_CATEGORY_EXTERNAL_CALL`]).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<String>,
    /// Human-readable reasons the index judged the symbol impure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub impurity_reasons: Vec<String>,
    /// Qualified names of external calls made by the symbol (e.g.
    /// `"fmt.Println"`), as recorded by the index. Consumed by the
    /// `callees` directive to synthesize external-call children
    /// (spec.md §4.3.3).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_calls: Vec<String>,
}

impl PurityInfo {
    /// Purity info for a synthesized external-call stub: `level` is
    /// `ExternalDependency` and the category set contains `external_call`,
    /// per spec.md §3's invariant on `isExternal` refs.
    pub fn external_call() -> Self {
        Self {
            is_pure: false,
            level: PurityLevel::ExternalDependency,
            score: 0.0,
            categories: BTreeSet::from([crate::constants::PURITY_CATEGORY_EXTERNAL_CALL.to_string()]),
            impurity_reasons: Vec::new(),
            external_calls: Vec::new(),
        }
    }
}
