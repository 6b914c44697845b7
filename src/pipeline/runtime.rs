use std::sync::Arc;

use crate::alignment::alternatives::{AlternativeSet, WildcardSet};
use crate::alignment::annotation::annotate;
use crate::alignment::normalize::normalize;
use crate::alignment::tokenization::tokens_from_words;
use crate::analysis::judgments::{
    decode_cefr_level, decode_correction, decode_embedding, decode_grammar_check,
    decode_idea_count, decode_relevance, decode_spell_check,
};
use crate::analysis::scoring::{grammar_score, spelling_score};
use crate::analysis::stats;
use crate::config::{Language, SentenceFloor, TargetWordMatch};
use crate::error::AnalysisError;
use crate::pipeline::traits::{JudgmentSource, SequenceAligner, Tokenizer, WordSplitter};
use crate::types::{
    AnnotationResult, GrammarCorrection, GrammarSpellStats, MetricsRecord, ModelReferenceStats,
    SentenceStats, TurnStats, WordStats,
};

/// Relevance reported for languages the relevance service does not cover.
const UNSCORED_RELEVANCE: u32 = 1;

/// One analysis session: a language, its tokenizer and alternatives table,
/// and the services judgments are requested from. Immutable once built.
pub struct TextAnalyzer {
    language: Language,
    alternatives: AlternativeSet,
    wildcards: WildcardSet,
    sentence_floor: SentenceFloor,
    target_word_match: TargetWordMatch,
    max_alignment_words: usize,
    tokenizer: Box<dyn Tokenizer>,
    word_splitter: Arc<dyn WordSplitter>,
    sequence_aligner: Box<dyn SequenceAligner>,
    judgments: Box<dyn JudgmentSource>,
}

pub(crate) struct TextAnalyzerParts {
    pub language: Language,
    pub alternatives: AlternativeSet,
    pub wildcards: WildcardSet,
    pub sentence_floor: SentenceFloor,
    pub target_word_match: TargetWordMatch,
    pub max_alignment_words: usize,
    pub tokenizer: Box<dyn Tokenizer>,
    pub word_splitter: Arc<dyn WordSplitter>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub judgments: Box<dyn JudgmentSource>,
}

impl TextAnalyzer {
    pub(crate) fn from_parts(parts: TextAnalyzerParts) -> Self {
        Self {
            language: parts.language,
            alternatives: parts.alternatives,
            wildcards: parts.wildcards,
            sentence_floor: parts.sentence_floor,
            target_word_match: parts.target_word_match,
            max_alignment_words: parts.max_alignment_words,
            tokenizer: parts.tokenizer,
            word_splitter: parts.word_splitter,
            sequence_aligner: parts.sequence_aligner,
            judgments: parts.judgments,
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn sentence_stats(&self, text: &str) -> SentenceStats {
        stats::sentence_stats(text, self.tokenizer.as_ref(), self.sentence_floor)
    }

    pub fn word_stats(&self, text: &str) -> WordStats {
        stats::word_stats(text, self.tokenizer.as_ref(), self.language.is_english())
    }

    pub fn turn_stats(&self, text: &str, target_words: &[String]) -> TurnStats {
        stats::turn_stats(
            text,
            self.tokenizer.as_ref(),
            target_words,
            self.target_word_match,
        )
    }

    /// Words as the alignment sees them; annotation positions index this
    /// list from 1.
    pub fn alignment_words(&self, text: &str) -> Vec<String> {
        self.word_splitter.split_words(text)
    }

    /// Word-level diff of `reference` against `candidate`, annotated on the
    /// reference side.
    pub fn align_transcripts(
        &self,
        reference: &str,
        candidate: &str,
    ) -> Result<AnnotationResult, AnalysisError> {
        let reference = tokens_from_words(self.word_splitter.split_words(reference));
        let candidate = tokens_from_words(self.word_splitter.split_words(candidate));

        let longest = reference.len().max(candidate.len());
        if longest > self.max_alignment_words {
            return Err(AnalysisError::invalid_input(format!(
                "alignment input too long: {longest} words > {} allowed",
                self.max_alignment_words
            )));
        }

        tracing::debug!(
            reference_words = reference.len(),
            candidate_words = candidate.len(),
            "analyzer: aligning transcripts"
        );
        let tags = self.sequence_aligner.align(
            &reference,
            &candidate,
            &self.alternatives,
            &self.wildcards,
        )?;
        Ok(annotate(&reference, candidate.len(), &tags))
    }

    pub fn grammar_correction(&self, text: &str) -> GrammarCorrection {
        if text.trim().is_empty() {
            return GrammarCorrection::default();
        }
        let Some(correction) = self
            .request("grammar_correction", self.judgments.grammar_correct(text, &self.language))
            .and_then(|body| decode_correction(&body))
        else {
            return GrammarCorrection::default();
        };

        match self.align_transcripts(text, &correction) {
            Ok(annotation) => GrammarCorrection {
                error_count: Some(annotation.error_count()),
                annotation: Some(annotation),
                correction: Some(correction),
            },
            Err(err) => {
                tracing::warn!(error = %err, "analyzer: correction left unannotated");
                GrammarCorrection {
                    correction: Some(correction),
                    ..GrammarCorrection::default()
                }
            }
        }
    }

    /// Grammar and spelling scores against `word_count` words. Each half
    /// keeps its defaults when its service gives nothing usable.
    pub fn grammar_spell_stats(&self, text: &str, word_count: usize) -> GrammarSpellStats {
        let mut stats = GrammarSpellStats::default();
        if word_count < 1 {
            return stats;
        }
        tracing::debug!(
            word_count,
            service_language = self.language.service_code(),
            "analyzer: requesting grammar and spelling checks"
        );

        if let Some(body) =
            self.request("grammar_check", self.judgments.grammar_check(text, &self.language))
        {
            if let Some(payload) = decode_grammar_check(&body) {
                let matches = payload.matches.len();
                stats.grammar_errors = matches as u32;
                stats.grammar_score = grammar_score(word_count, matches);
                stats.grammar_payload = body;
            }
        }

        let normalized = normalize(text);
        if let Some(body) = self.request(
            "spell_check",
            self.judgments.spell_check(&normalized, &self.language),
        ) {
            if let Some(payload) = decode_spell_check(&body) {
                if let Some(results) = payload.results() {
                    let correct = results.iter().filter(|correct| **correct).count();
                    stats.spelling_errors = (results.len() - correct) as u32;
                    stats.spelling_score = spelling_score(correct, word_count);
                }
                stats.spelling_payload = body;
            }
        }

        stats
    }

    pub fn idea_count(&self, text: &str) -> Option<u32> {
        if text.trim().is_empty() {
            return None;
        }
        self.request("idea_count", self.judgments.idea_count(text, &self.language))
            .and_then(|body| decode_idea_count(&body))
    }

    pub fn cefr_level(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.request("cefr_level", self.judgments.cefr_level(text, &self.language))
            .and_then(|body| decode_cefr_level(&body))
    }

    /// Relevance of `text` to the reference answer, as an integer percent.
    pub fn relevance(&self, text: &str, reference_embedding: &str) -> Option<u32> {
        if text.trim().is_empty() || reference_embedding.trim().is_empty() {
            return None;
        }
        if !self.language.is_english() {
            return Some(UNSCORED_RELEVANCE);
        }
        self.request(
            "relevance",
            self.judgments
                .relevance(text, reference_embedding, &self.language),
        )
        .and_then(|body| decode_relevance(&body))
    }

    pub fn embedding(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.request("embedding", self.judgments.embedding(text, &self.language))
            .and_then(|body| decode_embedding(&body))
    }

    /// Every metric for one transcript; absent judgments take their neutral
    /// values.
    pub fn analyze(
        &self,
        text: &str,
        target_words: &[String],
        reference_embedding: Option<&str>,
    ) -> MetricsRecord {
        let words = self.word_stats(text);
        let grammar_spell = self.grammar_spell_stats(text, words.total_words as usize);

        MetricsRecord {
            turns: self.turn_stats(text, target_words),
            idea_count: self.idea_count(text).unwrap_or(0),
            cefr_level: self.cefr_level(text).unwrap_or_default(),
            relevance: reference_embedding
                .and_then(|embedding| self.relevance(text, embedding))
                .unwrap_or(0),
            sentences: self.sentence_stats(text),
            words,
            grammar_spell,
        }
    }

    /// Embedding and idea count of a model answer, for later relevance
    /// scoring of learner transcripts. English only.
    pub fn model_reference_stats(&self, text: &str) -> ModelReferenceStats {
        if text.trim().is_empty() || !self.language.is_english() {
            return ModelReferenceStats::default();
        }
        ModelReferenceStats {
            embedding: self.embedding(text),
            idea_count: self.idea_count(text).filter(|count| *count > 0),
        }
    }

    fn request(
        &self,
        service: &'static str,
        response: Result<String, AnalysisError>,
    ) -> Option<String> {
        match response {
            Ok(body) => Some(body),
            Err(err) => {
                tracing::debug!(service, error = %err, "analyzer: judgment unavailable");
                None
            }
        }
    }
}
