//! Declaration-line scan fallback (spec.md §4.3.1 item 3), used when a
//! `ContextRef` names a symbol but supplies no explicit line range.
//!
//! Grounded on the teacher's own AST-unavailable fallback
//! (`mcb-language-support::chunking::SemanticChunking`'s whole-file chunk
//! when no functions are found): when structural parsing isn't available,
//! fall back to a line-oriented heuristic rather than failing outright.

/// Scan `source` for a line that both mentions `symbol` and contains one of
/// `keywords` as a whole word — a declaration line. The symbol's body runs
/// from that line until the next such line, or EOF.
///
/// Returns `(body, start_line, end_line)`, both 1-indexed inclusive.
pub fn scan_for_declaration(
    source: &str,
    symbol: &str,
    keywords: &[&str],
) -> Option<(String, usize, usize)> {
    let lines: Vec<&str> = source.lines().collect();
    let start_idx = lines
        .iter()
        .position(|line| line.contains(symbol) && contains_keyword(line, keywords))?;

    let end_idx = lines[start_idx + 1..]
        .iter()
        .position(|line| contains_keyword(line, keywords))
        .map_or(lines.len(), |offset| start_idx + 1 + offset);

    let body = lines[start_idx..end_idx].join("\n");
    Some((body, start_idx + 1, end_idx))
}

fn contains_keyword(line: &str, keywords: &[&str]) -> bool {
    line.split(|c: char| !c.is_alphanumeric() && c != '_')
        .any(|token| keywords.contains(&token))
}

/// One declaration found by [`scan_declarations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared name (function/method/type identifier).
    pub name: String,
    /// Receiver type, for methods declared as `func (r T) Name(...)`.
    pub receiver_type: Option<String>,
    /// First line of the declaration, 1-indexed.
    pub start: usize,
    /// Last line of the declaration (exclusive of the next declaration),
    /// 1-indexed.
    pub end: usize,
}

/// Scan every top-level declaration line in `source`, used by the
/// `siblings` directive to find other methods/functions in the same file
/// without requiring the Symbol Index to expose a file-listing capability.
pub fn scan_declarations(source: &str, keywords: &[&str]) -> Vec<Declaration> {
    let lines: Vec<&str> = source.lines().collect();
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| contains_keyword(line, keywords))
        .map(|(i, _)| i)
        .collect();

    let mut decls = Vec::new();
    for (pos, &start_idx) in starts.iter().enumerate() {
        let end_idx = starts.get(pos + 1).copied().unwrap_or(lines.len());
        if let Some((name, receiver_type)) = parse_declaration_line(lines[start_idx]) {
            decls.push(Declaration {
                name,
                receiver_type,
                start: start_idx + 1,
                end: end_idx,
            });
        }
    }
    decls
}

/// Parse a single declaration line into `(name, receiver_type)`. Recognizes
/// the Go method form `func (r T) Name(...)`; anything else yields the
/// first identifier after the keyword with no receiver.
fn parse_declaration_line(line: &str) -> Option<(String, Option<String>)> {
    let trimmed = line.trim_start();
    let rest = trimmed
        .split_once(char::is_whitespace)
        .map_or("", |(_, r)| r)
        .trim_start();

    if let Some(after_paren) = rest.strip_prefix('(') {
        let close = after_paren.find(')')?;
        let receiver_group = &after_paren[..close];
        let receiver_type = receiver_group
            .rsplit(char::is_whitespace)
            .next()
            .map(|t| t.trim_start_matches('*').to_string());
        let name_part = after_paren[close + 1..].trim_start();
        let name = take_identifier(name_part)?;
        return Some((name, receiver_type));
    }

    let name = take_identifier(rest)?;
    Some((name, None))
}

fn take_identifier(s: &str) -> Option<String> {
    let end = s
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some(s[..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxcore_domain::constants::DECLARATION_KEYWORDS;

    #[test]
    fn finds_go_function_and_stops_at_next_declaration() {
        let source = "package main\n\nfunc Foo() {\n  doStuff()\n}\n\nfunc Bar() {\n}\n";
        let (body, start, end) = scan_for_declaration(source, "Foo", DECLARATION_KEYWORDS).unwrap();
        assert_eq!(start, 3);
        assert_eq!(end, 5);
        assert!(body.starts_with("func Foo() {"));
        assert!(!body.contains("Bar"));
    }

    #[test]
    fn runs_to_eof_when_no_following_declaration() {
        let source = "func Foo() {\n  return\n}\n";
        let (_, start, end) = scan_for_declaration(source, "Foo", DECLARATION_KEYWORDS).unwrap();
        assert_eq!(start, 1);
        assert_eq!(end, 3);
    }

    #[test]
    fn returns_none_when_symbol_never_appears_on_a_declaration_line() {
        let source = "package main\n\nfunc Bar() {}\n";
        assert!(scan_for_declaration(source, "Foo", DECLARATION_KEYWORDS).is_none());
    }
}
