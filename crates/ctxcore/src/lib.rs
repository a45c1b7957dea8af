//! # Context Expansion Core
//!
//! Facade crate re-exporting the public surface of the Context Expansion
//! Core: the [`ExpansionEngine`]/[`HydrationDriver`] pair that turns a
//! [`ContextManifest`] into a token-budgeted [`HydratedContext`], and the
//! [`IndexingLifecycleManager`] that starts, cancels, and awaits the
//! background indexing run a hydration request depends on.
//!
//! This crate carries no logic of its own — every type here is defined in
//! one of the five layered crates it depends on. A host wires its own
//! [`SymbolIndex`] and [`IndexingWorker`] implementations and otherwise
//! only touches this crate's re-exports.

pub use ctxcore_domain::error::{Error, Result};
pub use ctxcore_domain::ports::SymbolIndex;
pub use ctxcore_domain::value_objects::{
    ContextManifest, ContextRef, DirectiveKind, ExpansionDirective, FileId, FileInfo,
    HydratedContext, HydratedRef, HydrationStats, IndexingSession, IndexingStatus, LineRange,
    PurityInfo, PurityLevel, ReportFormat, SessionId, Symbol, SymbolId, SymbolKind,
};

pub use ctxcore_extractor::{
    extract_by_lines, first_code_line, leading_comment_block, parse_type_deps, read_file,
    scan_declarations, scan_for_declaration,
};

pub use ctxcore_expansion::{hydrate, hydrate_symbol, ExpansionEngine, Hydrated};

pub use ctxcore_hydration::{manifest_io, DriverConfig, HydrationDriver};

pub use ctxcore_lifecycle::{IndexingConfig, IndexingLifecycleManager, IndexingWorker};
