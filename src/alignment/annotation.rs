use std::collections::BTreeMap;

use crate::types::{AlignmentTag, AnnotationResult, ErrorRecord, MatchRecord, Token};

/// Build positioned error/match records from alignment tags.
///
/// Positions are 1-based. Errors at or after the last matched position are
/// dropped (with no match at all, every error is dropped). Matches are never
/// dropped. `candidate_len` only feeds the insertion estimate.
pub fn annotate(
    reference: &[Token],
    candidate_len: usize,
    tags: &[AlignmentTag],
) -> AnnotationResult {
    debug_assert_eq!(
        reference.len(),
        tags.len(),
        "annotation expects one tag per reference token"
    );

    let mut errors = BTreeMap::new();
    let mut matches = BTreeMap::new();
    let mut last_matched = 0usize;

    for (idx, (token, tag)) in reference.iter().zip(tags).enumerate() {
        let position = idx + 1;
        match *tag {
            AlignmentTag::Matched {
                candidate_position,
                alternate,
            } => {
                matches.insert(
                    position,
                    MatchRecord {
                        word: token.word.clone(),
                        reference_position: position,
                        candidate_position,
                        alternate,
                    },
                );
                last_matched = position;
            }
            AlignmentTag::Unmatched => {
                errors.insert(
                    position,
                    ErrorRecord {
                        word: token.word.clone(),
                        word_number: position,
                    },
                );
            }
        }
    }

    let before = errors.len();
    errors.retain(|&position, _| position < last_matched);
    if errors.len() < before {
        tracing::debug!(
            discarded = before - errors.len(),
            last_matched,
            "annotation: discarded trailing errors"
        );
    }

    AnnotationResult {
        errors,
        matches,
        insertion_estimate: candidate_len.saturating_sub(reference.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::alternatives::{AlternativeSet, WildcardSet};
    use crate::alignment::lcs::align_sequences;
    use crate::alignment::tokenization::{split_normalized_words, tokens_from_words};

    fn tokens(text: &str) -> Vec<Token> {
        tokens_from_words(split_normalized_words(text))
    }

    fn annotate_texts(reference: &str, candidate: &str) -> AnnotationResult {
        let reference = tokens(reference);
        let candidate = tokens(candidate);
        let tags = align_sequences(
            &reference,
            &candidate,
            &AlternativeSet::default(),
            &WildcardSet::default(),
        );
        annotate(&reference, candidate.len(), &tags)
    }

    #[test]
    fn empty_reference_yields_empty_result() {
        let result = annotate(&[], 0, &[]);
        assert!(result.errors.is_empty());
        assert!(result.matches.is_empty());
        assert_eq!(result.insertion_estimate, 0);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn identical_texts_have_no_errors() {
        let result = annotate_texts("I like green apples", "I like green apples");
        assert!(result.errors.is_empty());
        assert_eq!(result.matches.len(), 4);
        assert_eq!(result.matches[&4].candidate_position, 3);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn inner_error_is_kept() {
        let result = annotate_texts("the cat sat on the mat", "the cat sat on a mat");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[&5],
            ErrorRecord {
                word: "the".to_string(),
                word_number: 5
            }
        );
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn trailing_errors_are_discarded() {
        let result = annotate_texts("i go to school yesterday", "i went to school");
        assert_eq!(result.errors.keys().copied().collect::<Vec<_>>(), [2]);
        assert!(result.matches.contains_key(&4));
        assert_eq!(result.insertion_estimate, 0);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn no_matches_means_no_errors() {
        let result = annotate_texts("red green blue", "cyan magenta");
        assert!(result.matches.is_empty());
        assert!(result.errors.is_empty());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn insertions_are_estimated_from_length_difference() {
        let result = annotate_texts("she go home", "she goes to her home now");
        assert_eq!(result.insertion_estimate, 3);
        assert_eq!(result.errors.keys().copied().collect::<Vec<_>>(), [2]);
        assert_eq!(result.error_count(), 4);
    }

    #[test]
    fn no_error_at_or_after_last_match() {
        let reference = tokens("a b c d e f");
        let tags = [
            AlignmentTag::Unmatched,
            AlignmentTag::Matched {
                candidate_position: 0,
                alternate: false,
            },
            AlignmentTag::Unmatched,
            AlignmentTag::Matched {
                candidate_position: 1,
                alternate: true,
            },
            AlignmentTag::Unmatched,
            AlignmentTag::Unmatched,
        ];
        let result = annotate(&reference, 2, &tags);
        let last_match = *result.matches.keys().last().expect("has matches");
        assert_eq!(last_match, 4);
        assert!(result.errors.keys().all(|&pos| pos < last_match));
        assert_eq!(result.errors.keys().copied().collect::<Vec<_>>(), [1, 3]);
        assert!(result.matches[&4].alternate);
    }

    #[test]
    fn errors_and_matches_are_disjoint() {
        let result = annotate_texts(
            "yesterday i go to the park with my friend",
            "yesterday i went to the park with my friends",
        );
        for position in result.errors.keys() {
            assert!(!result.matches.contains_key(position));
        }
    }

    #[test]
    fn annotate_is_deterministic() {
        let reference = tokens("we was happy");
        let candidate = tokens("we were happy");
        let tags = align_sequences(
            &reference,
            &candidate,
            &AlternativeSet::default(),
            &WildcardSet::default(),
        );
        let first = annotate(&reference, candidate.len(), &tags);
        let second = annotate(&reference, candidate.len(), &tags);
        assert_eq!(first, second);
    }
}
