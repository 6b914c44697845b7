use std::path::Path;

use transcript_metrics_rs::Report;

use crate::report_output::write_output;

pub fn write_report(path: &Path, report: &Report) -> Result<(), String> {
    write_output(path, &render_report(report)?)
}

/// Pretty JSON of the whole report, newline-terminated.
fn render_report(report: &Report) -> Result<String, String> {
    let mut rendered = serde_json::to_string_pretty(report).map_err(|err| {
        format!(
            "Failed to serialize report for {} case(s): {err}",
            report.meta.case_count
        )
    })?;
    rendered.push('\n');
    Ok(rendered)
}
