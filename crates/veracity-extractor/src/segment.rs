//! Sentence segmentation

use veracity_domain::normalize_whitespace;

/// Split text into trimmed sentences on runs of `.`, `!` and `?`
///
/// Whitespace is collapsed first. Sentences shorter than `min_chars`
/// characters are dropped.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    normalized
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() >= min_chars)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_terminal_punctuation() {
        let sentences = split_sentences(
            "First sentence is long enough. Second one also qualifies!! Is the third long enough?",
            20,
        );
        assert_eq!(
            sentences,
            vec![
                "First sentence is long enough",
                "Second one also qualifies",
                "Is the third long enough",
            ]
        );
    }

    #[test]
    fn test_short_sentences_dropped() {
        let sentences = split_sentences("Too short. This sentence is long enough to keep", 20);
        assert_eq!(sentences, vec!["This sentence is long enough to keep"]);
    }

    #[test]
    fn test_boundary_length_kept() {
        // 20 characters exactly
        let sentences = split_sentences("abcdefghij klmnopqrs.", 20);
        assert_eq!(sentences, vec!["abcdefghij klmnopqrs"]);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let sentences = split_sentences("A   sentence\nthat spans\t\tlines here.", 20);
        assert_eq!(sentences, vec!["A sentence that spans lines here"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_sentences("", 20).is_empty());
        assert!(split_sentences("...!?", 20).is_empty());
    }
}
