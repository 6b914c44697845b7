use std::sync::Arc;

use crate::alignment::alternatives::{AlternativeSet, WildcardSet};
use crate::alignment::lcs::align_sequences;
use crate::alignment::tokenization::{
    count_space_delimited, split_normalized_words, split_on_spaces, split_unicode_words,
};
use crate::config::Language;
use crate::error::AnalysisError;
use crate::pipeline::traits::{JudgmentSource, SequenceAligner, Tokenizer, WordSplitter};
use crate::types::{AlignmentTag, Token};

pub struct NormalizedWordSplitter;

impl WordSplitter for NormalizedWordSplitter {
    fn split_words(&self, text: &str) -> Vec<String> {
        split_normalized_words(text)
    }
}

pub struct UnicodeWordSplitter;

impl WordSplitter for UnicodeWordSplitter {
    fn split_words(&self, text: &str) -> Vec<String> {
        split_unicode_words(text)
    }
}

pub struct DelimiterTokenizer {
    splitter: Arc<dyn WordSplitter>,
}

impl DelimiterTokenizer {
    pub fn new(splitter: Arc<dyn WordSplitter>) -> Self {
        Self { splitter }
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn words(&self, text: &str) -> Vec<String> {
        self.splitter.split_words(text)
    }
}

/// Whitespace-count approximation for scripts without reliable
/// punctuation-based word boundaries.
pub struct SpaceCountingTokenizer;

impl Tokenizer for SpaceCountingTokenizer {
    fn words(&self, text: &str) -> Vec<String> {
        split_on_spaces(text)
    }

    fn word_count(&self, text: &str) -> usize {
        count_space_delimited(text)
    }
}

pub struct LcsSequenceAligner;

impl SequenceAligner for LcsSequenceAligner {
    fn align(
        &self,
        reference: &[Token],
        candidate: &[Token],
        alternatives: &AlternativeSet,
        wildcards: &WildcardSet,
    ) -> Result<Vec<AlignmentTag>, AnalysisError> {
        Ok(align_sequences(reference, candidate, alternatives, wildcards))
    }
}

/// Judgment source for offline use: every service is unavailable, so every
/// judgment falls back to its default.
pub struct NoJudgments;

impl NoJudgments {
    fn unavailable(service: &'static str) -> Result<String, AnalysisError> {
        Err(AnalysisError::service_unavailable(
            service,
            "no judgment source configured",
        ))
    }
}

impl JudgmentSource for NoJudgments {
    fn grammar_correct(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::unavailable("grammar_correction")
    }

    fn spell_check(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::unavailable("spell_check")
    }

    fn grammar_check(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::unavailable("grammar_check")
    }

    fn relevance(
        &self,
        _text: &str,
        _reference_embedding: &str,
        _language: &Language,
    ) -> Result<String, AnalysisError> {
        Self::unavailable("relevance")
    }

    fn cefr_level(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::unavailable("cefr_level")
    }

    fn idea_count(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::unavailable("idea_count")
    }

    fn embedding(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::unavailable("embedding")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::tokenization::tokens_from_words;

    #[test]
    fn delimiter_tokenizer_uses_splitter() {
        let tokenizer = DelimiterTokenizer::new(Arc::new(NormalizedWordSplitter));
        assert_eq!(tokenizer.words("Hello, World!"), ["hello", "world"]);
        assert_eq!(tokenizer.word_count("Hello, World!"), 2);
        let tokens = tokenizer.tokenize("a b");
        assert_eq!(tokens[1], Token::new("b", 1));
    }

    #[test]
    fn delimiter_tokenizer_with_unicode_splitter() {
        let tokenizer = DelimiterTokenizer::new(Arc::new(UnicodeWordSplitter));
        assert_eq!(tokenizer.words("It's well-known"), ["it's", "well", "known"]);
    }

    #[test]
    fn space_counting_tokenizer_keeps_edge_words() {
        let tokenizer = SpaceCountingTokenizer;
        assert_eq!(tokenizer.word_count("كتاب  جديد"), 2);
        assert_eq!(tokenizer.words(" كتاب").len(), 2);
        assert_eq!(tokenizer.word_count(" كتاب"), 2);
    }

    #[test]
    fn lcs_sequence_aligner_align() {
        let aligner = LcsSequenceAligner;
        let reference = tokens_from_words(vec!["a".into(), "b".into()]);
        let candidate = tokens_from_words(vec!["b".into()]);
        let alternatives = AlternativeSet::default();
        let wildcards = WildcardSet::default();
        let tags = aligner
            .align(&reference, &candidate, &alternatives, &wildcards)
            .unwrap();
        let expected = align_sequences(&reference, &candidate, &alternatives, &wildcards);
        assert_eq!(tags, expected);
    }

    #[test]
    fn no_judgments_reports_unavailable() {
        let lang = Language::parse("en-US").unwrap();
        let err = NoJudgments.cefr_level("text", &lang).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ServiceUnavailable {
                service: "cefr_level",
                ..
            }
        ));
    }
}
