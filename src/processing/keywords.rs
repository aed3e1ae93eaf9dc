//! Frequency-based keyword extraction.
//!
//! Tokens are maximal runs of word characters, lowercased and counted across
//! the whole document. The top `num_keywords` tokens by frequency are selected
//! first and the length filter (strictly more than 3 characters) is applied
//! afterwards, so the result may hold fewer entries than requested. Ties are
//! broken by the order in which a token was first encountered.

use regex::Regex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::OnceLock;

/// Default number of keywords to extract.
pub const DEFAULT_KEYWORD_COUNT: usize = 10;

/// Tokens at or below this length are dropped from the final list.
const MIN_KEYWORD_CHARS: usize = 3;

static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn word_pattern() -> &'static Regex {
    WORD_PATTERN.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

/// Extract the most frequent word tokens from a document.
///
/// Returns at most `num_keywords` lowercase tokens, ordered by descending
/// frequency with first-occurrence order breaking ties. The length filter
/// runs after the top-N selection, so fewer entries than requested may come
/// back. Empty text, or a `num_keywords` of zero, yields an empty vector.
pub fn extract_keywords(text: &str, num_keywords: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    // First-seen order doubles as the tie-break for equal counts.
    let mut ranked: Vec<String> = Vec::new();

    for token in word_pattern().find_iter(text) {
        let token = token.as_str().to_lowercase();
        match counts.entry(token) {
            Entry::Occupied(mut occupied) => *occupied.get_mut() += 1,
            Entry::Vacant(vacant) => {
                ranked.push(vacant.key().clone());
                vacant.insert(1);
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts.
    ranked.sort_by_key(|token| std::cmp::Reverse(counts[token.as_str()]));
    ranked.truncate(num_keywords);
    ranked.retain(|token| token.chars().count() > MIN_KEYWORD_CHARS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_keywords() {
        assert!(extract_keywords("", DEFAULT_KEYWORD_COUNT).is_empty());
    }

    #[test]
    fn length_filter_runs_after_selection() {
        // cat:3, dog:2, bird:1 — the top two are selected first, then both
        // fall to the length filter even though "bird" would have survived it.
        let keywords = extract_keywords("cat cat cat dog dog bird", 2);
        assert!(keywords.is_empty());
    }

    #[test]
    fn frequent_long_tokens_survive() {
        let keywords = extract_keywords("elephant elephant giraffe giraffe zebra", 3);
        assert_eq!(keywords, vec!["elephant", "giraffe"]);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let keywords = extract_keywords("second first second first third third", 3);
        assert_eq!(keywords, vec!["second", "first", "third"]);
    }

    #[test]
    fn tokens_are_lowercased_and_merged() {
        let keywords = extract_keywords("Alpha ALPHA alpha Beta beta", 2);
        assert_eq!(keywords, vec!["alpha", "beta"]);
    }

    #[test]
    fn digits_and_underscores_are_word_characters() {
        let keywords = extract_keywords("snake_case snake_case version2 version2 ab", 3);
        assert_eq!(keywords, vec!["snake_case", "version2"]);
    }

    #[test]
    fn zero_keywords_requested_yields_empty() {
        assert!(extract_keywords("elephant elephant", 0).is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "reactor reactor coolant coolant coolant turbine";
        assert_eq!(extract_keywords(text, 5), extract_keywords(text, 5));
    }
}
