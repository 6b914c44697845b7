use std::sync::Arc;

use crate::alignment::alternatives::{AlternativeSet, WildcardSet};
use crate::config::{AnalysisConfig, Language, TokenizerKind};
use crate::error::AnalysisError;
use crate::pipeline::defaults::{
    DelimiterTokenizer, LcsSequenceAligner, NoJudgments, NormalizedWordSplitter,
    SpaceCountingTokenizer,
};
use crate::pipeline::runtime::{TextAnalyzer, TextAnalyzerParts};
use crate::pipeline::traits::{JudgmentSource, SequenceAligner, Tokenizer, WordSplitter};

pub struct TextAnalyzerBuilder {
    config: AnalysisConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    word_splitter: Option<Arc<dyn WordSplitter>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    judgments: Option<Box<dyn JudgmentSource>>,
}

impl TextAnalyzerBuilder {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            word_splitter: None,
            sequence_aligner: None,
            judgments: None,
        }
    }

    /// Overrides the language-selected tokenizer used for statistics.
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_word_splitter(mut self, word_splitter: Arc<dyn WordSplitter>) -> Self {
        self.word_splitter = Some(word_splitter);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_judgments(mut self, judgments: Box<dyn JudgmentSource>) -> Self {
        self.judgments = Some(judgments);
        self
    }

    pub fn build(self) -> Result<TextAnalyzer, AnalysisError> {
        let language = Language::parse(&self.config.language)?;
        let word_splitter = self
            .word_splitter
            .unwrap_or_else(|| Arc::new(NormalizedWordSplitter));

        let alternatives =
            AlternativeSet::parse(&self.config.alternatives_table()?, word_splitter.as_ref())?;
        let wildcards = WildcardSet::from_alternatives(&alternatives);

        let tokenizer = match self.tokenizer {
            Some(tokenizer) => tokenizer,
            None => match language.tokenizer_kind() {
                TokenizerKind::DelimiterBased => {
                    Box::new(DelimiterTokenizer::new(Arc::clone(&word_splitter)))
                        as Box<dyn Tokenizer>
                }
                TokenizerKind::SpaceCounting => Box::new(SpaceCountingTokenizer),
            },
        };

        tracing::info!(
            language = language.code(),
            tokenizer = ?language.tokenizer_kind(),
            alternative_classes = alternatives.class_count(),
            wildcards = wildcards.len(),
            "analyzer: session configured"
        );

        Ok(TextAnalyzer::from_parts(TextAnalyzerParts {
            language,
            alternatives,
            wildcards,
            sentence_floor: self.config.sentence_floor,
            target_word_match: self.config.target_word_match,
            max_alignment_words: self.config.max_alignment_words,
            tokenizer,
            word_splitter,
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(LcsSequenceAligner)),
            judgments: self.judgments.unwrap_or_else(|| Box::new(NoJudgments)),
        }))
    }
}
