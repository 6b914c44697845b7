fn is_terminal(c: char) -> bool {
    matches!(c, '!' | '?' | '.')
}

/// Split text on runs of `!?.` that are not immediately followed by a digit.
///
/// A run directly before a digit gives up its last character, which stays
/// with the number: "3.14" is never split and "wait..5" splits as "wait" /
/// ".5". Whitespace-only fragments are discarded.
pub fn segment_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |&(offset, _)| offset);

    let mut fragments = Vec::new();
    let mut fragment_start = 0usize;
    let mut i = 0usize;
    while i < chars.len() {
        if !is_terminal(chars[i].1) {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut run_end = i;
        while run_end < chars.len() && is_terminal(chars[run_end].1) {
            run_end += 1;
        }

        let followed_by_digit = chars
            .get(run_end)
            .is_some_and(|&(_, c)| c.is_ascii_digit());
        let split_end = if followed_by_digit {
            run_end - 1
        } else {
            run_end
        };

        if split_end > run_start {
            fragments.push(&text[fragment_start..byte_at(run_start)]);
            fragment_start = byte_at(split_end);
        }
        i = run_end;
    }
    fragments.push(&text[fragment_start..]);

    fragments.retain(|fragment| !fragment.trim().is_empty());
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_sentences() {
        assert!(segment_sentences("").is_empty());
        assert!(segment_sentences("  ...  ").is_empty());
    }

    #[test]
    fn splits_on_terminal_runs() {
        assert_eq!(
            segment_sentences("Hello there! How are you?? Fine."),
            ["Hello there", " How are you", " Fine"]
        );
    }

    #[test]
    fn text_without_terminal_is_one_sentence() {
        assert_eq!(segment_sentences("no punctuation here"), ["no punctuation here"]);
    }

    #[test]
    fn decimal_numbers_are_not_split() {
        assert_eq!(
            segment_sentences("Pi is 3.14 roughly. Yes"),
            ["Pi is 3.14 roughly", " Yes"]
        );
    }

    #[test]
    fn run_before_digit_keeps_last_char_with_number() {
        assert_eq!(segment_sentences("wait..5 more"), ["wait", ".5 more"]);
    }

    #[test]
    fn single_terminal_before_digit_does_not_split() {
        assert_eq!(segment_sentences("Version 2.0 shipped"), ["Version 2.0 shipped"]);
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(
            segment_sentences("Ça va? Très bien. Merci"),
            ["Ça va", " Très bien", " Merci"]
        );
    }
}
