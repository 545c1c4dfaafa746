//! Reserved tokens and the textual path formats.
//!
//! # Flat keys
//! A flat key joins path segments with [`PATH_SEPARATOR`]: `a.b.0.c`. A root scalar flattens to
//! the empty key. Record keys that already contain the separator are not supported.
//!
//! # Path tokens
//! A path token replaces a repeated compound in the cycle-free tree. It starts with
//! [`TOKEN_SENTINEL`] and joins the first-visitation path with the same sentinel:
//!
//! ```text
//! ~            the root
//! ~b           the record at key "b" of the root
//! ~k~1         element 1 of the sequence at key "k"
//! ```
//!
//! Literal sentinels inside a segment are written as [`ESCAPED_SENTINEL`], so a token can
//! always be split back into its segments.

/// Separator between segments of a flat key.
pub const PATH_SEPARATOR: char = '.';

/// First character of every path token, and the separator between its segments.
pub const TOKEN_SENTINEL: char = '~';

/// Replacement for a literal [`TOKEN_SENTINEL`] inside a token segment.
pub const ESCAPED_SENTINEL: &str = "\\x7e";

/// Value recorded by diff for keys that exist only on the left side.
pub const DELETED_MARKER: &str = "{deleted}";

/// Escapes literal sentinels in one token segment.
pub fn escape_segment(segment: &str) -> String {
    segment.replace(TOKEN_SENTINEL, ESCAPED_SENTINEL)
}

/// Builds the token for the given (unescaped) segments.
pub fn path_token<S: AsRef<str>>(segments: &[S]) -> String {
    let mut token = String::from(TOKEN_SENTINEL);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            token.push(TOKEN_SENTINEL);
        }
        token.push_str(&escape_segment(segment.as_ref()));
    }
    token
}

/// Splits a token back into unescaped segments.
///
/// Returns `None` if `token` does not start with the sentinel. The root token `~` yields an
/// empty list.
pub fn decompose_token(token: &str) -> Option<Vec<String>> {
    let body = token.strip_prefix(TOKEN_SENTINEL)?;
    if body.is_empty() {
        return Some(Vec::new());
    }
    Some(
        body.split(TOKEN_SENTINEL)
            .map(|s| s.replace(ESCAPED_SENTINEL, "~"))
            .collect(),
    )
}

/// Joins a parent flat key with a child segment. The root has the empty key.
pub fn join_key(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        return segment.to_owned();
    }
    let mut key = String::with_capacity(parent.len() + 1 + segment.len());
    key.push_str(parent);
    key.push(PATH_SEPARATOR);
    key.push_str(segment);
    key
}

/// Parses a canonical non-negative integer segment: `0`, or ASCII digits with no leading zero.
///
/// Non-canonical forms (`01`, `+1`, `1e3`, ` 1`) are record keys, not indices.
pub fn parse_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    let first = *bytes.first()?;
    if !bytes.iter().all(u8::is_ascii_digit) || (first == b'0' && bytes.len() > 1) {
        return None;
    }
    segment.parse().ok()
}
