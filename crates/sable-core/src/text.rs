//! Text primitives: sizes, ranges, and identifier scanning around a cursor.

pub use text_size::{TextRange, TextSize};

/// `true` if `ch` may start a Java-like identifier.
#[inline]
pub fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_ident::is_xid_start(ch)
}

/// `true` if `ch` may continue a Java-like identifier.
#[inline]
pub fn is_ident_part(ch: char) -> bool {
    ch == '$' || unicode_ident::is_xid_continue(ch)
}

/// `true` if `text` is a non-empty identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_part),
        _ => false,
    }
}

/// The identifier fragment immediately before a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPrefix<'a> {
    /// Range replaced by an accepted proposal (start of the fragment up to the cursor).
    pub range: TextRange,
    /// The fragment itself; empty right after `.` or whitespace.
    pub token: &'a str,
}

/// Scan backwards from `offset` over identifier characters.
///
/// Offsets past the end are clamped to the end of `text`; offsets inside a
/// multi-byte character are moved back to the previous character boundary.
/// A fragment that starts with a character that cannot start an identifier
/// (for example a digit) is trimmed to the first valid start.
pub fn completion_prefix(text: &str, offset: usize) -> CompletionPrefix<'_> {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    let mut start = end;
    for (idx, ch) in text[..end].char_indices().rev() {
        if !is_ident_part(ch) {
            break;
        }
        start = idx;
    }

    // `1abc` is not an identifier; keep the longest suffix that is.
    while start < end {
        let Some(first) = text[start..end].chars().next() else {
            break;
        };
        if is_ident_start(first) {
            break;
        }
        start += first.len_utf8();
    }

    CompletionPrefix {
        range: TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32)),
        token: &text[start..end],
    }
}
