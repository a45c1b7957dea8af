//! # Domain Layer
//!
//! Entities, value objects, ports, and errors for the Context Expansion
//! Core. Contains only pure domain types and the port trait the engine
//! depends on — no filesystem access, no JSON I/O, no async runtime
//! dependency beyond the trait signatures themselves.
//!
//! ## Architecture
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`value_objects`] | `ContextRef`, `ContextManifest`, `HydratedRef`, `HydratedContext`, `IndexingSession`, ... |
//! | [`ports`] | The `SymbolIndex` external-collaborator interface |
//! | [`constants`] | Directive kinds, declaration keywords, numeric defaults |
//! | [`error`] | The shared `Error` enum reused by every downstream crate |

/// Domain-level constants: directive kinds, keyword tables, numeric defaults.
pub mod constants;
/// The shared error type.
pub mod error;
/// External provider port interfaces.
pub mod ports;
mod util;
/// Core entities and value objects.
pub mod value_objects;

pub use util::approx_tokens;
