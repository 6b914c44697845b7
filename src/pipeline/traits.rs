use crate::alignment::alternatives::{AlternativeSet, WildcardSet};
use crate::alignment::tokenization::tokens_from_words;
use crate::config::Language;
use crate::error::AnalysisError;
use crate::types::{AlignmentTag, Token};

/// Splits text into one string per syntactic word.
pub trait WordSplitter: Send + Sync {
    fn split_words(&self, text: &str) -> Vec<String>;
}

pub trait Tokenizer: Send + Sync {
    fn words(&self, text: &str) -> Vec<String>;

    fn word_count(&self, text: &str) -> usize {
        self.words(text).len()
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokens_from_words(self.words(text))
    }
}

pub trait SequenceAligner: Send + Sync {
    fn align(
        &self,
        reference: &[Token],
        candidate: &[Token],
        alternatives: &AlternativeSet,
        wildcards: &WildcardSet,
    ) -> Result<Vec<AlignmentTag>, AnalysisError>;
}

/// Remote judgment services. Each call returns the raw response body; the
/// analyzer decodes it and treats any failure as an absent judgment.
pub trait JudgmentSource: Send + Sync {
    fn grammar_correct(&self, text: &str, language: &Language) -> Result<String, AnalysisError>;

    /// `text` is already normalized.
    fn spell_check(&self, text: &str, language: &Language) -> Result<String, AnalysisError>;

    fn grammar_check(&self, text: &str, language: &Language) -> Result<String, AnalysisError>;

    fn relevance(
        &self,
        text: &str,
        reference_embedding: &str,
        language: &Language,
    ) -> Result<String, AnalysisError>;

    fn cefr_level(&self, text: &str, language: &Language) -> Result<String, AnalysisError>;

    fn idea_count(&self, text: &str, language: &Language) -> Result<String, AnalysisError>;

    fn embedding(&self, text: &str, language: &Language) -> Result<String, AnalysisError>;
}
