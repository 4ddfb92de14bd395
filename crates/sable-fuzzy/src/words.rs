//! Splitting identifiers into humps (camelCase) and words (subword matching).

use std::ops::Range;

#[inline]
pub(crate) fn fold_byte(b: u8) -> u8 {
    b.to_ascii_lowercase()
}

#[inline]
pub(crate) fn is_separator(b: u8) -> bool {
    matches!(b, b'_' | b'$' | b'-' | b' ' | b'.')
}

/// Humps used by camelCase matching.
///
/// Every ASCII uppercase letter starts a hump (so `URLConnection` has the humps
/// `U`, `R`, `L`, `Connection`), as does the first character after a separator
/// and the first digit of a digit run. Separators belong to no hump.
pub(crate) fn camel_humps(text: &[u8]) -> Vec<Range<usize>> {
    split(text, |prev, cur| {
        cur.is_ascii_uppercase() || (cur.is_ascii_digit() && !prev.is_ascii_digit())
    })
}

/// Words used by subword matching.
///
/// Unlike humps, a run of capitals stays one word (`parseURL` is `parse`,
/// `URL`), and a word boundary also appears between the last capital of a run
/// and a following lowercase letter (`URLConnection` is `URL`, `Connection`).
pub(crate) fn words(text: &[u8]) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &b) in text.iter().enumerate() {
        if is_separator(b) {
            if let Some(s) = start.take() {
                out.push(s..i);
            }
            continue;
        }
        let Some(s) = start else {
            start = Some(i);
            continue;
        };
        let prev = text[i - 1];
        let next = text.get(i + 1).copied();
        let boundary = (prev.is_ascii_lowercase() && b.is_ascii_uppercase())
            || (prev.is_ascii_uppercase()
                && b.is_ascii_uppercase()
                && next.is_some_and(|n| n.is_ascii_lowercase()))
            || (prev.is_ascii_alphabetic() && b.is_ascii_digit())
            || (prev.is_ascii_digit() && b.is_ascii_alphabetic());
        if boundary {
            out.push(s..i);
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(s..text.len());
    }
    out
}

/// Pattern segments for camelCase matching: a new segment starts at every
/// uppercase letter and after every separator.
pub(crate) fn camel_segments(pattern: &[u8]) -> Vec<Range<usize>> {
    split(pattern, |_, cur| cur.is_ascii_uppercase())
}

fn split(text: &[u8], starts_hump: impl Fn(u8, u8) -> bool) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &b) in text.iter().enumerate() {
        if is_separator(b) {
            if let Some(s) = start.take() {
                out.push(s..i);
            }
            continue;
        }
        match start {
            None => start = Some(i),
            Some(s) => {
                if starts_hump(text[i - 1], b) {
                    out.push(s..i);
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        out.push(s..text.len());
    }
    out
}

/// Case-insensitive comparison of `needle` against the start of `haystack`.
///
/// Returns `Some(case_exact)` on a match.
#[inline]
pub(crate) fn starts_with_folded(haystack: &[u8], needle: &[u8]) -> Option<bool> {
    if needle.len() > haystack.len() {
        return None;
    }
    let mut exact = true;
    for (&h, &n) in haystack.iter().zip(needle) {
        if fold_byte(h) != fold_byte(n) {
            return None;
        }
        exact &= h == n;
    }
    Some(exact)
}
