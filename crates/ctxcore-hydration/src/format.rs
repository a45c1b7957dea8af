//! `format` output reduction (spec.md §6, decided at SPEC_FULL.md §10.3):
//! `full` leaves hydrated source untouched; `signatures` reduces every
//! hydrated ref's `source` (recursively, including expansion children) to
//! its signature line; `outline` does the same and additionally blanks
//! `source` on non-external refs, keeping only metadata.
//!
//! Applied as a post-processing pass after token accounting, so reducing
//! for display never changes how much budget a ref was charged.

use ctxcore_domain::value_objects::{HydratedRef, ReportFormat};
use ctxcore_extractor::first_code_line;

/// Apply `format` to every ref in `refs`, recursing into `expanded`.
pub fn apply(refs: &mut [HydratedRef], format: ReportFormat) {
    if format == ReportFormat::Full {
        return;
    }
    for hydrated in refs {
        apply_one(hydrated, format);
    }
}

fn apply_one(hydrated: &mut HydratedRef, format: ReportFormat) {
    if !hydrated.is_external {
        hydrated.source = first_code_line(&hydrated.source);
        if format == ReportFormat::Outline {
            hydrated.source.clear();
        }
    }
    for children in hydrated.expanded.values_mut() {
        for child in children {
            apply_one(child, format);
        }
    }
}
