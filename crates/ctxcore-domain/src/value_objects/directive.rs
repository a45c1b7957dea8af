//! Expansion directive grammar: `kind[:depth]`.
//!
//! On the wire (manifest JSON, spec.md §6) a directive is the bare string
//! `"callers:2"`, not a structured object — `ExpansionDirective` implements
//! `Serialize`/`Deserialize` by hand to round-trip through that string form.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{
    DEFAULT_DIRECTIVE_DEPTH, DIRECTIVE_CALLEES, DIRECTIVE_CALLERS, DIRECTIVE_DOC,
    DIRECTIVE_IMPLEMENTATIONS, DIRECTIVE_INTERFACE, DIRECTIVE_SIBLINGS, DIRECTIVE_SIGNATURE,
    DIRECTIVE_TESTS, DIRECTIVE_TYPE_DEPS,
};

/// The relationship edge an expansion directive walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Symbols that call the referenced symbol.
    Callers,
    /// Symbols the referenced symbol calls.
    Callees,
    /// Concrete implementations of a referenced interface.
    Implementations,
    /// Interface(s) implemented by the referenced type.
    Interface,
    /// Other symbols declared in the same file.
    Siblings,
    /// Types referenced by the symbol's signature.
    TypeDeps,
    /// Test functions covering the referenced symbol.
    Tests,
    /// The symbol's leading documentation comment, hydrated in place.
    Doc,
    /// The symbol's signature line only, hydrated in place.
    Signature,
}

impl DirectiveKind {
    fn parse(raw: &str) -> Option<Self> {
        let kind = match raw {
            s if s == DIRECTIVE_CALLERS => Self::Callers,
            s if s == DIRECTIVE_CALLEES => Self::Callees,
            s if s == DIRECTIVE_IMPLEMENTATIONS => Self::Implementations,
            s if s == DIRECTIVE_INTERFACE => Self::Interface,
            s if s == DIRECTIVE_SIBLINGS => Self::Siblings,
            s if s == DIRECTIVE_TYPE_DEPS => Self::TypeDeps,
            s if s == DIRECTIVE_TESTS => Self::Tests,
            s if s == DIRECTIVE_DOC => Self::Doc,
            s if s == DIRECTIVE_SIGNATURE => Self::Signature,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this directive kind recurses to a configurable depth.
    pub fn is_recursive(self) -> bool {
        matches!(self, Self::Callers | Self::Callees)
    }

    /// Whether this directive mutates the hydrated ref's own `source`
    /// in place rather than populating `expanded` with children.
    pub fn is_in_place(self) -> bool {
        matches!(self, Self::Doc | Self::Signature)
    }

    /// The directive's name, as used in `ExpansionDirective` tokens and as
    /// the key under `HydratedRef::expanded`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Callers => DIRECTIVE_CALLERS,
            Self::Callees => DIRECTIVE_CALLEES,
            Self::Implementations => DIRECTIVE_IMPLEMENTATIONS,
            Self::Interface => DIRECTIVE_INTERFACE,
            Self::Siblings => DIRECTIVE_SIBLINGS,
            Self::TypeDeps => DIRECTIVE_TYPE_DEPS,
            Self::Tests => DIRECTIVE_TESTS,
            Self::Doc => DIRECTIVE_DOC,
            Self::Signature => DIRECTIVE_SIGNATURE,
        }
    }
}

/// A single parsed `kind[:depth]` expansion directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionDirective {
    /// Relationship edge to walk.
    pub kind: DirectiveKind,
    /// Recursion depth; only meaningful for [`DirectiveKind::is_recursive`] kinds.
    pub depth: u32,
}

impl ExpansionDirective {
    /// Parse a single `kind` or `kind:depth` token.
    ///
    /// Returns `None` when `kind` isn't a recognized directive name. A
    /// missing, non-positive, or non-numeric `:depth` falls back to
    /// [`DEFAULT_DIRECTIVE_DEPTH`] rather than rejecting the directive.
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.splitn(2, ':');
        let kind = DirectiveKind::parse(parts.next()?.trim())?;
        let depth = parts
            .next()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .filter(|d| *d > 0)
            .map_or(DEFAULT_DIRECTIVE_DEPTH, |d| d as u32);
        Some(Self { kind, depth })
    }

    /// Parse a comma-separated directive list, silently dropping unrecognized
    /// tokens.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .filter_map(Self::parse)
            .collect()
    }

    /// Render back to the `kind[:depth]` wire form. Only recursive kinds
    /// carry an explicit depth; non-recursive kinds render bare, since depth
    /// has no effect on them.
    pub fn to_token(self) -> String {
        if self.kind.is_recursive() {
            format!("{}:{}", self.kind.as_str(), self.depth)
        } else {
            self.kind.as_str().to_string()
        }
    }
}

impl Serialize for ExpansionDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_token())
    }
}

struct ExpansionDirectiveVisitor;

impl Visitor<'_> for ExpansionDirectiveVisitor {
    type Value = ExpansionDirective;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a directive string of the form `kind` or `kind:depth`")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        ExpansionDirective::parse(value)
            .ok_or_else(|| de::Error::custom(format!("unrecognized directive: {value}")))
    }
}

impl<'de> Deserialize<'de> for ExpansionDirective {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ExpansionDirectiveVisitor)
    }
}
