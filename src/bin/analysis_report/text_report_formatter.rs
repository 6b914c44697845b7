use std::fmt::Write as _;
use std::path::Path;

use transcript_metrics_rs::{CaseReport, Report};

use crate::report_output::write_output;

pub fn write_report(path: &Path, report: &Report) -> Result<(), String> {
    write_output(path, &render_report(report))
}

fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "generated {} | language {} | {} case(s)",
        report.meta.generated_at, report.meta.language, report.meta.case_count
    );
    for case in &report.cases {
        out.push('\n');
        render_case(&mut out, case);
    }

    let aggregates = &report.aggregates;
    out.push('\n');
    let _ = writeln!(
        out,
        "totals: {} corrected case(s), {} correction error(s), {} spelling error(s), \
         {} grammar error(s)",
        aggregates.corrected_case_count,
        aggregates.total_correction_errors,
        aggregates.total_spelling_errors,
        aggregates.total_grammar_errors
    );
    let _ = writeln!(
        out,
        "means: grammar {} | spelling {} | words {}",
        format_mean(aggregates.mean_grammar_score),
        format_mean(aggregates.mean_spelling_score),
        format_mean(aggregates.mean_words)
    );
    out
}

fn render_case(out: &mut String, case: &CaseReport) {
    let metrics = &case.metrics;
    let _ = writeln!(out, "== {}", case.id);
    let _ = writeln!(
        out,
        "turns {} | words {} (unique {}, long {}) | sentences {} (avg {}, longest {})",
        metrics.turns.turns,
        metrics.words.total_words,
        metrics.words.unique_words,
        metrics.words.long_words,
        metrics.sentences.count,
        metrics.sentences.average_words,
        metrics.sentences.longest_words
    );
    let _ = writeln!(
        out,
        "target words {}/{} | grammar {} | spelling {} | cefr {} | ideas {} | relevance {}",
        metrics.turns.target_words_used,
        metrics.turns.total_target_words,
        metrics.grammar_spell.grammar_score,
        metrics.grammar_spell.spelling_score,
        if metrics.cefr_level.is_empty() { "-" } else { metrics.cefr_level.as_str() },
        metrics.idea_count,
        metrics.relevance
    );
    if let Some(marked) = case.marked_transcript.as_deref() {
        let _ = writeln!(out, "transcript: {marked}");
    }
    if let Some(correction) = case.correction.correction.as_deref() {
        let _ = writeln!(
            out,
            "correction: {correction} ({} error(s))",
            case.correction.error_count.unwrap_or(0)
        );
    }
    if !case.spelling_errors.is_empty() {
        let _ = writeln!(out, "misspelled: {}", case.spelling_errors.join(", "));
    }
    for issue in &case.grammar_errors {
        let _ = writeln!(out, "grammar @{}+{}: {}", issue.offset, issue.length, issue.message);
    }
    if !case.notes.is_empty() {
        let _ = writeln!(out, "notes: {}", case.notes.join(", "));
    }
}

fn format_mean(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.1}"))
}
