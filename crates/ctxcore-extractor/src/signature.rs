//! Signature parsing for the `type_deps` directive (spec.md §4.3.4).
//!
//! Parses a Go-family signature string — optional receiver, identifier,
//! parameter list, return list — into the set of named types it references,
//! filtering built-ins and unresolved package-qualified forms.

use ctxcore_domain::constants::BUILTIN_TYPE_NAMES;

/// Extract the named types referenced by a signature's receiver, parameters,
/// and return values.
pub fn parse_type_deps(signature: &str) -> Vec<String> {
    let mut types = Vec::new();
    let mut rest = signature.trim();

    rest = rest.strip_prefix("func").unwrap_or(rest).trim_start();

    // Optional receiver: `(name T)` immediately preceding the identifier.
    if rest.starts_with('(') {
        if let Some((group, tail)) = take_bracketed(rest, '(', ')') {
            if let Some(ty) = normalize_atom(group) {
                types.push(ty);
            }
            rest = tail.trim_start();
        }
    }

    // Skip the function identifier.
    let ident_len = rest
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(rest.len());
    rest = rest[ident_len..].trim_start();

    // Parameter list.
    if rest.starts_with('(') {
        if let Some((group, tail)) = take_bracketed(rest, '(', ')') {
            for atom in split_top_level_commas(group) {
                if let Some(ty) = normalize_atom(atom) {
                    types.push(ty);
                }
            }
            rest = tail.trim_start();
        }
    }

    // Return type(s): parenthesized list, or a single bare type.
    if !rest.is_empty() {
        if rest.starts_with('(') {
            if let Some((group, _tail)) = take_bracketed(rest, '(', ')') {
                for atom in split_top_level_commas(group) {
                    if let Some(ty) = normalize_atom(atom) {
                        types.push(ty);
                    }
                }
            }
        } else if let Some(ty) = normalize_atom(rest) {
            types.push(ty);
        }
    }

    types
}

/// Consume a bracketed group starting at `open` in `s`, returning its inner
/// content and the remainder of `s` after the matching `close`.
fn take_bracketed(s: &str, open: char, close: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[1..i], &s[i + 1..]));
            }
        }
    }
    None
}

/// Split `s` on top-level commas, respecting nested `()[]{}`.
fn split_top_level_commas(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = s[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

/// Normalize one parameter/return/receiver atom into a type name, or `None`
/// when the atom yields no named type (built-in, `map[K]V`, `interface{}`,
/// `any`).
fn normalize_atom(atom: &str) -> Option<String> {
    let atom = atom.trim();
    if atom.is_empty() {
        return None;
    }
    // Each atom's last whitespace-separated token is its type expression.
    let token = atom.rsplit(char::is_whitespace).next()?;
    let ty = strip_type_decorations(token);
    if ty.is_empty() || ty.starts_with("map[") || ty == "interface{}" {
        return None;
    }
    if BUILTIN_TYPE_NAMES.contains(&ty.as_str()) {
        return None;
    }
    Some(ty)
}

/// Strip pointer, slice, channel, variadic, and package-qualifier
/// decorations from a raw type token, per spec.md §4.3.4.
fn strip_type_decorations(token: &str) -> String {
    let mut t = token;
    loop {
        if let Some(rest) = t.strip_prefix('*') {
            t = rest;
        } else if let Some(rest) = t.strip_prefix("[]") {
            t = rest;
        } else if let Some(rest) = t.strip_prefix("...") {
            t = rest;
        } else if let Some(rest) = t.strip_prefix("<-chan ") {
            t = rest;
        } else if let Some(rest) = t.strip_prefix("chan<- ") {
            t = rest;
        } else if let Some(rest) = t.strip_prefix("chan ") {
            t = rest;
        } else {
            break;
        }
    }
    match t.rfind('.') {
        Some(idx) => t[idx + 1..].to_string(),
        None => t.to_string(),
    }
}
