pub mod alignment;
pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::alternatives::{AlternativeSet, WildcardSet};
pub use analysis::report::{
    aggregate_reports, compute_case_report, AggregateReport, AnalysisCase, CaseReport, Meta,
    Report,
};
pub use analysis::scoring::{collect_target_words, grammar_errors, spelling_errors};
pub use config::{AnalysisConfig, Language, SentenceFloor, TargetWordMatch};
pub use error::AnalysisError;
pub use pipeline::builder::TextAnalyzerBuilder;
pub use pipeline::recorded::{RecordedJudgments, RecordedResponses};
pub use pipeline::runtime::TextAnalyzer;
pub use pipeline::traits::{JudgmentSource, SequenceAligner, Tokenizer, WordSplitter};
pub use types::{
    AlignmentTag, AnnotationResult, ErrorRecord, GrammarCorrection, GrammarSpellStats,
    MatchRecord, MetricsRecord, ModelReferenceStats, SentenceStats, Token, TurnStats, WordStats,
};
