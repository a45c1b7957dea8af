//! `doc` and `signature` in-place reductions (spec.md §4.3.3).

/// The leading contiguous comment block of `source`: comment lines from the
/// top, skipping leading blank lines, stopping at the first non-comment
/// line. Empty when `source` doesn't open with a comment.
pub fn leading_comment_block(source: &str) -> String {
    let mut block = Vec::new();
    let mut in_block_comment = false;
    let mut started = false;

    for line in source.lines() {
        let trimmed = line.trim();
        if !started {
            if trimmed.is_empty() {
                continue;
            }
            started = true;
        }
        if in_block_comment {
            block.push(line);
            if trimmed.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if trimmed.starts_with("//") {
            block.push(line);
        } else if trimmed.starts_with("/*") {
            block.push(line);
            if !trimmed.contains("*/") {
                in_block_comment = true;
            }
        } else {
            break;
        }
    }
    block.join("\n")
}

/// The first non-empty, non-comment line of `source`, trimmed.
pub fn first_code_line(source: &str) -> String {
    let mut in_block_comment = false;
    for line in source.lines() {
        let trimmed = line.trim();
        if in_block_comment {
            if trimmed.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if trimmed.starts_with("/*") {
            if !trimmed.contains("*/") {
                in_block_comment = true;
            }
            continue;
        }
        return trimmed.to_string();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_comment_block_stops_at_code() {
        let source = "// does a thing\n// second line\nfunc Foo() {}\n";
        assert_eq!(leading_comment_block(source), "// does a thing\n// second line");
    }

    #[test]
    fn leading_comment_block_empty_when_no_leading_comment() {
        let source = "func Foo() {}\n// trailing, not leading\n";
        assert_eq!(leading_comment_block(source), "");
    }

    #[test]
    fn first_code_line_skips_comments_and_blanks() {
        let source = "\n// a doc comment\n\nfunc Foo() {\n  return\n}\n";
        assert_eq!(first_code_line(source), "func Foo() {");
    }

    #[test]
    fn signature_applied_twice_is_idempotent() {
        let source = "// doc\nfunc Foo() {\n  return\n}\n";
        let once = first_code_line(source);
        let twice = first_code_line(&once);
        assert_eq!(once, twice);
    }
}
