//! Domain layer constants
//!
//! Single source of truth for the core's numeric defaults and the small
//! vocabularies (directive kinds, declaration keywords, built-in type names)
//! that the extractor and expansion engine key their behavior off of.

// ============================================================================
// TOKEN ACCOUNTING
// ============================================================================

/// Characters per approximate token, per the `ceil(len/4)` contract.
pub const CHARS_PER_TOKEN: usize = 4;

/// `maxTokens` value that disables the budget cap.
pub const UNLIMITED_TOKENS: usize = 0;

// ============================================================================
// EXPANSION DIRECTIVES
// ============================================================================

/// Default depth applied when a directive omits `:depth`, or the parsed
/// value is non-positive or non-numeric.
pub const DEFAULT_DIRECTIVE_DEPTH: u32 = 1;

/// `callers` directive kind.
pub const DIRECTIVE_CALLERS: &str = "callers";
/// `callees` directive kind.
pub const DIRECTIVE_CALLEES: &str = "callees";
/// `implementations` directive kind.
pub const DIRECTIVE_IMPLEMENTATIONS: &str = "implementations";
/// `interface` directive kind.
pub const DIRECTIVE_INTERFACE: &str = "interface";
/// `siblings` directive kind.
pub const DIRECTIVE_SIBLINGS: &str = "siblings";
/// `type_deps` directive kind.
pub const DIRECTIVE_TYPE_DEPS: &str = "type_deps";
/// `tests` directive kind.
pub const DIRECTIVE_TESTS: &str = "tests";
/// `doc` directive kind.
pub const DIRECTIVE_DOC: &str = "doc";
/// `signature` directive kind.
pub const DIRECTIVE_SIGNATURE: &str = "signature";

/// Purity category attached to synthesized external-call references.
pub const PURITY_CATEGORY_EXTERNAL_CALL: &str = "external_call";

// ============================================================================
// SOURCE EXTRACTOR
// ============================================================================

/// Keywords that mark a top-level declaration line, across the language
/// families the extractor's line-scan fallback supports (C-family, Go,
/// Python, Rust).
pub const DECLARATION_KEYWORDS: &[&str] = &[
    "func", "fn", "def", "class", "type", "struct", "interface", "enum", "function",
];

/// Built-in scalar type names filtered out of `type_deps` results.
pub const BUILTIN_TYPE_NAMES: &[&str] = &[
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "bool",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "error",
    "any",
];

// ============================================================================
// LIFECYCLE MANAGER
// ============================================================================

/// Minimum capacity of the status broadcast channel (spec.md §4.1).
pub const STATUS_CHANNEL_CAPACITY: usize = 8;

/// Default indexing wait timeout used when a caller passes none.
pub const DEFAULT_INDEXING_TIMEOUT_SECS: u64 = 120;
