//! Fixed-width chunking at character offsets.
//!
//! Summarization models accept a bounded input, so documents are split into
//! consecutive windows of `chunk_size` characters before being handed to the
//! provider. Splitting is purely positional: chunks may end mid-word or
//! mid-sentence, and concatenating them in order reproduces the document
//! exactly. Counts are Unicode scalar values, so multi-byte text never splits
//! inside a code point.

/// Default chunk size, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Determine the chunk size for a request, respecting overrides.
///
/// An explicit override (e.g., `CHUNK_SIZE`) wins and is clamped at `>= 1`;
/// otherwise the default of 1000 characters applies.
pub(crate) fn determine_chunk_size(override_size: Option<usize>) -> usize {
    match override_size {
        Some(explicit) => explicit.max(1),
        None => DEFAULT_CHUNK_SIZE,
    }
}

/// Split text into consecutive chunks of at most `chunk_size` characters.
///
/// Every chunk holds exactly `chunk_size` characters except possibly the
/// last, which holds the remainder. Empty input yields an empty vector; input
/// no longer than `chunk_size` yields a single chunk equal to the whole text.
/// A `chunk_size` of zero is clamped to one.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    let size = chunk_size.max(1);
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let boundary = rest
            .char_indices()
            .nth(size)
            .map(|(offset, _)| offset)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(boundary);
        chunks.push(head.to_string());
        rest = tail;
    }

    chunks
}

/// Return the prefix of `text` holding at most `max_chars` characters.
///
/// Used to bound the context handed to the question-answering provider.
/// Truncation happens at a char boundary, never inside a code point.
pub(crate) fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_concatenate_to_original() {
        let text = "The quick brown fox jumps over the lazy dog";
        let chunks = chunk_text(text, 7);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn all_chunks_full_except_last() {
        let chunks = chunk_text("abcdefg", 3);
        assert_eq!(chunks, vec!["abc", "def", "g"]);
    }

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let chunks = chunk_text("abcdef", 3);
        assert_eq!(chunks, vec!["abc", "def"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 1000).is_empty());
    }

    #[test]
    fn short_text_yields_single_chunk() {
        let chunks = chunk_text("short", 1000);
        assert_eq!(chunks, vec!["short"]);
    }

    #[test]
    fn chunking_counts_characters_not_bytes() {
        let text = "héllo wörld";
        let chunks = chunk_text(text, 4);
        assert_eq!(chunks, vec!["héll", "o wö", "rld"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let chunks = chunk_text("ab", 0);
        assert_eq!(chunks, vec!["a", "b"]);
    }

    #[test]
    fn determine_chunk_size_prefers_override() {
        assert_eq!(determine_chunk_size(Some(42)), 42);
        assert_eq!(determine_chunk_size(Some(0)), 1);
        assert_eq!(determine_chunk_size(None), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn char_prefix_respects_boundaries() {
        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("héllo", 10), "héllo");
        assert_eq!(char_prefix("", 4), "");
    }
}
