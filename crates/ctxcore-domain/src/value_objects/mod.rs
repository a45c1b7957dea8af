//! Entities and value objects shared across the workspace (spec.md §3).

mod context_ref;
mod directive;
mod hydrated;
mod ids;
mod manifest;
mod purity;
mod session;
mod symbol;

pub use context_ref::{ContextRef, LineRange, ReportFormat};
pub use directive::{DirectiveKind, ExpansionDirective};
pub use hydrated::{HydratedContext, HydratedRef, HydrationStats};
pub use ids::{FileId, SessionId, SymbolId};
pub use manifest::ContextManifest;
pub use purity::{PurityInfo, PurityLevel};
pub use session::{IndexingSession, IndexingStatus};
pub use symbol::{FileInfo, Symbol, SymbolKind};
