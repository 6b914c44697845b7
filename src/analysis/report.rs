use serde::{Deserialize, Serialize};

use crate::analysis::scoring::{collect_target_words, grammar_errors, spelling_errors};
use crate::pipeline::recorded::RecordedResponses;
use crate::pipeline::runtime::TextAnalyzer;
use crate::types::{AnnotationResult, GrammarCorrection, GrammarErrors, MetricsRecord};

/// One transcript to analyze, with the service responses to replay for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisCase {
    pub id: String,
    pub transcript: String,
    /// Newline-separated target words of the topic.
    #[serde(default)]
    pub topic_words: String,
    /// Newline-separated target words the learner added.
    #[serde(default)]
    pub learner_words: String,
    #[serde(default)]
    pub reference_embedding: Option<String>,
    #[serde(default)]
    pub responses: RecordedResponses,
}

impl AnalysisCase {
    pub fn target_words(&self) -> Vec<String> {
        collect_target_words(&self.topic_words, &self.learner_words)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub language: String,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub metrics: MetricsRecord,
    pub correction: GrammarCorrection,
    /// Transcript words with correction errors wrapped in brackets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_transcript: Option<String>,
    pub spelling_errors: Vec<String>,
    pub grammar_errors: GrammarErrors,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AggregateReport {
    pub case_count: u32,
    pub corrected_case_count: u32,
    pub total_correction_errors: u32,
    pub total_spelling_errors: u32,
    pub total_grammar_errors: u32,
    pub mean_grammar_score: Option<f32>,
    pub mean_spelling_score: Option<f32>,
    pub mean_words: Option<f32>,
}

pub fn compute_case_report(analyzer: &TextAnalyzer, case: &AnalysisCase) -> CaseReport {
    let mut notes = Vec::new();

    let metrics = analyzer.analyze(
        &case.transcript,
        &case.target_words(),
        case.reference_embedding.as_deref(),
    );
    if metrics.turns.turns == 0 {
        notes.push("no_turns".to_string());
    }

    let correction = analyzer.grammar_correction(&case.transcript);
    let marked_transcript = match (&correction.correction, &correction.annotation) {
        (None, _) => {
            notes.push("no_correction".to_string());
            None
        }
        (Some(_), None) => {
            notes.push("correction_unannotated".to_string());
            None
        }
        (Some(_), Some(annotation)) => Some(mark_errors(
            &analyzer.alignment_words(&case.transcript),
            annotation,
        )),
    };

    CaseReport {
        id: case.id.clone(),
        spelling_errors: spelling_errors(&metrics.grammar_spell, &case.transcript),
        grammar_errors: grammar_errors(&metrics.grammar_spell, &case.transcript),
        metrics,
        correction,
        marked_transcript,
        notes,
    }
}

/// Join `words` with every annotated error word wrapped as `[word]`.
pub fn mark_errors(words: &[String], annotation: &AnnotationResult) -> String {
    words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            if annotation.errors.contains_key(&(idx + 1)) {
                format!("[{word}]")
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn aggregate_reports(cases: &[CaseReport]) -> AggregateReport {
    let mut aggregate = AggregateReport {
        case_count: to_u32(cases.len()),
        ..AggregateReport::default()
    };
    if cases.is_empty() {
        return aggregate;
    }

    for case in cases {
        if let Some(errors) = case.correction.error_count {
            aggregate.corrected_case_count += 1;
            aggregate.total_correction_errors += to_u32(errors);
        }
        aggregate.total_spelling_errors += case.metrics.grammar_spell.spelling_errors;
        aggregate.total_grammar_errors += case.metrics.grammar_spell.grammar_errors;
    }

    aggregate.mean_grammar_score =
        mean(cases.iter().map(|case| case.metrics.grammar_spell.grammar_score));
    aggregate.mean_spelling_score =
        mean(cases.iter().map(|case| case.metrics.grammar_spell.spelling_score));
    aggregate.mean_words = mean(cases.iter().map(|case| case.metrics.words.total_words));
    aggregate
}

fn mean(values: impl Iterator<Item = u32>) -> Option<f32> {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), value| {
        (sum + u64::from(value), count + 1)
    });
    (count > 0).then(|| (sum as f64 / count as f64) as f32)
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
