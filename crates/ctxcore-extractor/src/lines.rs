//! Line-range splicing (spec.md §4.3.1 item 2).

use ctxcore_domain::error::{Error, Result};
use ctxcore_domain::value_objects::LineRange;

/// Read a file's full contents from disk, mapping I/O failure to
/// [`Error::FileNotFound`] rather than a generic I/O error — the Hydration
/// Driver's policy table (spec.md §7) treats `file-not-found` as its own
/// category.
pub fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        tracing::debug!(path, error = %source, "file read failed");
        Error::file_not_found(path)
    })
}

/// Splice `range` (1-indexed, inclusive) out of `content`.
///
/// `end` is clamped to the file's last line; `start` out of range is an
/// error. Returns the spliced text and the last line actually included.
pub fn extract_by_lines(path: &str, content: &str, range: LineRange) -> Result<(String, usize)> {
    let lines: Vec<&str> = content.lines().collect();
    if range.start < 1 || range.start > lines.len() {
        return Err(Error::line_out_of_range(path, range.start, lines.len()));
    }
    let end = range.end.min(lines.len());
    let spliced = lines[range.start - 1..end].join("\n");
    Ok((spliced, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "func Foo() {\n  //\n  //\n  //\n}\n";

    #[test]
    fn splices_inclusive_range() {
        let (text, last) = extract_by_lines("a.go", SOURCE, LineRange { start: 1, end: 5 }).unwrap();
        assert_eq!(last, 5);
        assert_eq!(text, "func Foo() {\n  //\n  //\n  //\n}");
    }

    #[test]
    fn clamps_end_past_eof() {
        let (text, last) =
            extract_by_lines("a.go", SOURCE, LineRange { start: 4, end: 100 }).unwrap();
        assert_eq!(last, 5);
        assert_eq!(text, "  //\n}");
    }

    #[test]
    fn errors_on_start_out_of_range() {
        let err = extract_by_lines("a.go", SOURCE, LineRange { start: 50, end: 60 });
        assert!(matches!(err, Err(Error::LineOutOfRange { .. })));
    }
}
