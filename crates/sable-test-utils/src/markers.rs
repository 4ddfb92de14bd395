/// Remove `$<digits>` markers, returning the text and each marker's offset in it.
///
/// A `$` not followed by a digit is kept verbatim.
pub fn strip_markers(text: &str) -> (String, Vec<(u32, usize)>) {
    let mut out = String::with_capacity(text.len());
    let mut markers = Vec::new();

    let bytes = text.as_bytes();
    let mut i = 0usize;
    let mut last = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > i + 1 {
                // `$` and ASCII digits are single-byte, so `i` and `j` are char boundaries.
                out.push_str(&text[last..i]);
                let id: u32 = text[i + 1..j].parse().expect("marker id fits in u32");
                assert!(
                    markers.iter().all(|(seen, _)| *seen != id),
                    "duplicate fixture marker ${id}"
                );
                markers.push((id, out.len()));
                i = j;
                last = j;
                continue;
            }
        }
        i += 1;
    }
    out.push_str(&text[last..]);
    (out, markers)
}

/// Strip the single `$0` cursor marker from `fixture`.
pub fn extract_cursor(fixture: &str) -> (String, usize) {
    let (text, markers) = strip_markers(fixture);
    let offset = markers
        .iter()
        .find(|(id, _)| *id == 0)
        .map(|(_, offset)| *offset)
        .expect("fixture missing $0 cursor marker");
    (text, offset)
}
