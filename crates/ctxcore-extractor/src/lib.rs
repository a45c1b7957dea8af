//! # Source Extractor
//!
//! Turns a `ContextRef` plus file content into hydrated text and metadata:
//! line-range splicing, a declaration-line scan fallback when only a symbol
//! name is given, Go-family signature parsing for `type_deps`, and the
//! in-place reductions backing the `doc`/`signature` directives.
//!
//! Holds no opinion on the Symbol Index or on directive walking — those
//! belong to `ctxcore-expansion`. This crate is pure text processing: no
//! async, no port traits.

mod comments;
mod declaration;
mod lines;
mod signature;

pub use comments::{first_code_line, leading_comment_block};
pub use declaration::{scan_declarations, scan_for_declaration};
pub use lines::{extract_by_lines, read_file};
pub use signature::parse_type_deps;
