//! The context manifest: the persisted, append-able unit of work that the
//! hydration driver consumes.

use serde::{Deserialize, Serialize};

use super::context_ref::ContextRef;
use crate::error::{Error, Result};

/// A manifest of context references to hydrate (spec.md §3, §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextManifest {
    /// Free-text description of the task this manifest serves.
    #[serde(default)]
    pub task: String,
    /// References to hydrate, in priority order.
    pub refs: Vec<ContextRef>,
    /// Absolute root the `refs[].file` paths are relative to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<String>,
}

impl ContextManifest {
    /// Construct a manifest, validating spec.md §3's invariant that `refs`
    /// is non-empty.
    pub fn new(task: impl Into<String>, refs: Vec<ContextRef>) -> Result<Self> {
        if refs.is_empty() {
            return Err(Error::invalid_manifest("refs must be non-empty"));
        }
        Ok(Self {
            task: task.into(),
            refs,
            project_root: None,
        })
    }

    /// Validate structural invariants a caller-supplied manifest must
    /// satisfy before hydration or persistence.
    pub fn validate(&self) -> Result<()> {
        if self.refs.is_empty() {
            return Err(Error::invalid_manifest("refs must be non-empty"));
        }
        for r in &self.refs {
            if !r.is_well_specified() {
                return Err(Error::invalid_manifest(format!(
                    "ref {} has neither a symbol name nor a line range",
                    r.file
                )));
            }
            if !r.has_valid_line_range() {
                return Err(Error::invalid_manifest(format!(
                    "ref {} has an invalid line range",
                    r.file
                )));
            }
        }
        Ok(())
    }

    /// Merge another manifest's references into this one, in append mode
    /// (spec.md §6): refs are concatenated, and this manifest's `task` is
    /// preserved unless it's empty, in which case `other`'s is adopted.
    pub fn append(&mut self, other: ContextManifest) {
        if self.task.is_empty() {
            self.task = other.task;
        }
        self.refs.extend(other.refs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::context_ref::LineRange;

    fn ref_with_role(role: &str) -> ContextRef {
        ContextRef {
            file: "a.go".to_string(),
            symbol: Some("Foo".to_string()),
            lines: None,
            role: Some(role.to_string()),
            note: None,
            expand: Vec::new(),
        }
    }

    #[test]
    fn new_rejects_empty_refs() {
        assert!(ContextManifest::new("demo", Vec::new()).is_err());
    }

    #[test]
    fn validate_rejects_underspecified_ref() {
        let manifest = ContextManifest {
            task: "demo".to_string(),
            refs: vec![ContextRef {
                file: "a.go".to_string(),
                symbol: None,
                lines: None,
                role: None,
                note: None,
                expand: Vec::new(),
            }],
            project_root: None,
        };
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_line_range() {
        let manifest = ContextManifest {
            task: "demo".to_string(),
            refs: vec![ContextRef {
                file: "a.go".to_string(),
                symbol: None,
                lines: Some(LineRange { start: 5, end: 1 }),
                role: None,
                note: None,
                expand: Vec::new(),
            }],
            project_root: None,
        };
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn append_preserves_task_unless_empty() {
        let mut a = ContextManifest::new("keep-me", vec![ref_with_role("primary")]).unwrap();
        let b = ContextManifest::new("ignored", vec![ref_with_role("test")]).unwrap();
        a.append(b);
        assert_eq!(a.task, "keep-me");
        assert_eq!(a.refs.len(), 2);

        let mut c = ContextManifest {
            task: String::new(),
            refs: vec![ref_with_role("primary")],
            project_root: None,
        };
        let d = ContextManifest::new("adopted", vec![ref_with_role("test")]).unwrap();
        c.append(d);
        assert_eq!(c.task, "adopted");
    }
}
