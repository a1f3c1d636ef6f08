//! Chunking helpers shared by the manual and property tests.

/// Split `text` into `parts` chunks of roughly equal byte length without
/// breaking UTF-8 code points.
pub(crate) fn chunks_of(text: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let target = text.len().div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + target).min(text.len());
        while end < text.len() && !text.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&text[start..end]);
        start = end;
    }
    chunks
}

/// Split `text` at positions derived from `splits`, one chunk per entry plus
/// a final remainder, each at least one byte and UTF-8 safe. Quickcheck
/// drives `splits`, so together the two cover every character boundary.
pub(crate) fn split_by<'a>(text: &'a str, splits: &[usize]) -> Vec<&'a str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for s in splits {
        if start >= text.len() {
            break;
        }
        let remaining = text.len() - start;
        let mut size = 1 + (s % remaining);
        while start + size < text.len() && !text.is_char_boundary(start + size) {
            size += 1;
        }
        chunks.push(&text[start..start + size]);
        start += size;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::{chunks_of, split_by};

    #[test]
    fn chunks_reassemble() {
        let text = "{\"k\":\"héllo 😀\"}";
        for parts in 1..=text.len() {
            assert_eq!(chunks_of(text, parts).concat(), text);
        }
        assert_eq!(split_by(text, &[0, 3, 100]).concat(), text);
    }
}
