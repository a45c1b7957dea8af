//! Manifest entries: a `ContextRef` names what source to hydrate and how far
//! to expand around it.

use serde::{Deserialize, Deserializer, Serialize};

use super::directive::ExpansionDirective;
use crate::error::{Error, Result};

/// An inclusive 1-indexed line range within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    /// First line, inclusive.
    pub start: usize,
    /// Last line, inclusive.
    pub end: usize,
}

/// How much of a hydrated reference's source survives into the final
/// manifest. Decided at hydration-driver load time (spec.md §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Full hydrated source for every reference, untouched.
    #[default]
    Full,
    /// Each reference's source reduced to its declaration/signature line.
    Signatures,
    /// Like `signatures`, and additionally blank for references that were
    /// pulled in purely as expansion neighbors (not directly requested).
    Outline,
}

/// A single entry in a [`crate::value_objects::manifest::ContextManifest`]:
/// a request to hydrate a region of source and expand around it (spec.md §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRef {
    /// File path (`F`).
    #[serde(rename = "f")]
    pub file: String,
    /// Symbol name to resolve via the Symbol Index (`S`), when known.
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Explicit line range to hydrate (`L`), when no symbol name is given or
    /// the caller wants a specific span regardless of symbol boundaries.
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineRange>,
    /// Free-form role tag (e.g. `"primary"`, `"test"`), used by the
    /// hydration driver's role filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Free-form caller-supplied annotation, carried through to the
    /// corresponding `HydratedRef` unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Expansion directives to walk outward from this reference (`X`).
    /// Unrecognized directive strings are dropped rather than rejected,
    /// per spec.md §6's directive grammar ("unknown kinds are ignored
    /// silently").
    #[serde(
        rename = "x",
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_directives"
    )]
    pub expand: Vec<ExpansionDirective>,
}

fn deserialize_directives<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<ExpansionDirective>, D::Error> {
    let tokens = Vec::<String>::deserialize(deserializer)?;
    Ok(tokens
        .iter()
        .filter_map(|t| ExpansionDirective::parse(t))
        .collect())
}

impl ContextRef {
    /// Construct a ref, validating spec.md §3's invariants: at least one of
    /// `symbol`/`lines` is set, and a given `lines` range is well-ordered.
    pub fn new(
        file: impl Into<String>,
        symbol: Option<String>,
        lines: Option<LineRange>,
    ) -> Result<Self> {
        let file = file.into();
        if symbol.is_none() && lines.is_none() {
            return Err(Error::underspecified_ref(file));
        }
        if let Some(range) = lines {
            if range.start < 1 || range.end < range.start {
                return Err(Error::invalid_argument(format!(
                    "invalid line range {}..={} for {file}",
                    range.start, range.end
                )));
            }
        }
        Ok(Self {
            file,
            symbol,
            lines,
            role: None,
            note: None,
            expand: Vec::new(),
        })
    }

    /// Whether this reference carries enough information to hydrate: either
    /// a symbol name or an explicit line range.
    pub fn is_well_specified(&self) -> bool {
        self.symbol.is_some() || self.lines.is_some()
    }

    /// Whether a given `lines` range, if present, is well-ordered.
    pub fn has_valid_line_range(&self) -> bool {
        self.lines
            .is_none_or(|range| range.start >= 1 && range.end >= range.start)
    }
}
