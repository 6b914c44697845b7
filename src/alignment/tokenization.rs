use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::alignment::normalize::normalize;
use crate::types::Token;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalize, then split on single spaces. Punctuation inside a word is
/// dropped, so "don't" becomes "dont" and "well-known" becomes "wellknown".
pub fn split_normalized_words(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased UAX #29 words. Contractions stay whole, hyphenated compounds
/// split into their parts.
pub fn split_unicode_words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Space-delimited words after collapsing whitespace runs.
///
/// This is an approximation for scripts where punctuation-based word
/// detection is unreliable: leading/trailing whitespace yields empty words
/// and punctuation stays attached to its neighbour.
pub fn split_on_spaces(text: &str) -> Vec<String> {
    collapse_whitespace(text)
        .split(' ')
        .map(str::to_string)
        .collect()
}

/// Number of spaces plus one after collapsing whitespace runs. Same
/// approximation as [`split_on_spaces`]; an empty string counts as one word.
pub fn count_space_delimited(text: &str) -> usize {
    collapse_whitespace(text).matches(' ').count() + 1
}

pub fn tokens_from_words(words: Vec<String>) -> Vec<Token> {
    words
        .into_iter()
        .enumerate()
        .map(|(position, word)| Token { word, position })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_split_on_empty_text() {
        assert!(split_normalized_words("").is_empty());
        assert!(split_normalized_words(" ,.;! ").is_empty());
    }

    #[test]
    fn normalized_split_drops_inner_punctuation() {
        assert_eq!(
            split_normalized_words("Don't stop, well-known FRIEND."),
            ["dont", "stop", "wellknown", "friend"]
        );
    }

    #[test]
    fn unicode_split_keeps_contractions() {
        assert_eq!(
            split_unicode_words("Don't stop, well-known FRIEND."),
            ["don't", "stop", "well", "known", "friend"]
        );
    }

    #[test]
    fn space_split_collapses_runs() {
        assert_eq!(split_on_spaces("a  b\t\tc"), ["a", "b", "c"]);
    }

    #[test]
    fn space_split_keeps_edge_empties() {
        assert_eq!(split_on_spaces(" a b "), ["", "a", "b", ""]);
    }

    #[test]
    fn space_count_is_spaces_plus_one() {
        assert_eq!(count_space_delimited("مرحبا   بالعالم"), 2);
        assert_eq!(count_space_delimited("كلمة"), 1);
        assert_eq!(count_space_delimited(""), 1);
        assert_eq!(count_space_delimited(" padded "), 3);
    }

    #[test]
    fn tokens_carry_zero_based_positions() {
        let tokens = tokens_from_words(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(tokens, [Token::new("a", 0), Token::new("b", 1)]);
    }
}
