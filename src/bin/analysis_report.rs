use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use transcript_metrics_rs::pipeline::defaults::{NormalizedWordSplitter, UnicodeWordSplitter};
use transcript_metrics_rs::{
    aggregate_reports, compute_case_report, AnalysisCase, AnalysisConfig, CaseReport, Meta,
    RecordedJudgments, Report, TextAnalyzerBuilder, WordSplitter,
};

#[path = "analysis_report/json_report_formatter.rs"]
mod json_report_formatter;
#[path = "analysis_report/report_output.rs"]
mod report_output;
#[path = "analysis_report/text_report_formatter.rs"]
mod text_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    /// One block per case with error words in brackets.
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SplitterChoice {
    Normalized,
    Unicode,
}

impl SplitterChoice {
    fn word_splitter(self) -> Arc<dyn WordSplitter> {
        match self {
            Self::Normalized => Arc::new(NormalizedWordSplitter),
            Self::Unicode => Arc::new(UnicodeWordSplitter),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "analysis_report")]
#[command(about = "Generate transcript analysis reports from recorded cases")]
struct Args {
    #[arg(
        long,
        env = "TRANSCRIPT_REPORT_CASES",
        default_value = "test-data/cases.json"
    )]
    cases: PathBuf,
    #[arg(long, env = "TRANSCRIPT_REPORT_CONFIG")]
    config: Option<PathBuf>,
    /// Overrides the language of the configuration file.
    #[arg(long, env = "TRANSCRIPT_REPORT_LANGUAGE")]
    language: Option<String>,
    #[arg(long, env = "TRANSCRIPT_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "TRANSCRIPT_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "TRANSCRIPT_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
    #[arg(
        long,
        env = "TRANSCRIPT_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output_format: OutputFormat,
    #[arg(
        long,
        env = "TRANSCRIPT_REPORT_SPLITTER",
        value_enum,
        default_value_t = SplitterChoice::Normalized
    )]
    splitter: SplitterChoice,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let mut config = match args.config.as_ref() {
        Some(path) => {
            let path = resolve_path(&repo_root, path);
            AnalysisConfig::load(&path)
                .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(language) = args.language.as_ref() {
        config.language = language.clone();
    }

    let cases_path = resolve_path(&repo_root, &args.cases);
    let mut cases = load_cases(&cases_path)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let word_splitter = args.splitter.word_splitter();
    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );

    let mut case_reports: Vec<CaseReport> = Vec::with_capacity(cases.len());
    let mut language = config.language.clone();
    for case in &cases {
        progress.set_message(case.id.clone());
        let analyzer = TextAnalyzerBuilder::new(config.clone())
            .with_word_splitter(Arc::clone(&word_splitter))
            .with_judgments(Box::new(RecordedJudgments::new(case.responses.clone())))
            .build()
            .map_err(|err| format!("Failed to build analyzer: {err}"))?;
        language = analyzer.language().code().to_string();
        case_reports.push(compute_case_report(&analyzer, case));
        progress.inc(1);
    }
    progress.finish_with_message("analysis pass complete");

    let aggregates = aggregate_reports(&case_reports);
    let report = Report {
        schema_version: 1,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            language,
            case_count: case_reports.len(),
        },
        cases: case_reports,
        aggregates,
    };

    let out_path = resolve_out_path(&repo_root, args.out.as_ref(), args.output_format);
    match args.output_format {
        OutputFormat::Json => json_report_formatter::write_report(&out_path, &report)?,
        OutputFormat::Text => text_report_formatter::write_report(&out_path, &report)?,
    }
    println!("{}", out_path.display());
    Ok(())
}

fn load_cases(path: &Path) -> Result<Vec<AnalysisCase>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()))
}

fn resolve_out_path(repo_root: &Path, out: Option<&PathBuf>, format: OutputFormat) -> PathBuf {
    if let Some(path) = out {
        return resolve_path(repo_root, path);
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    repo_root
        .join("target")
        .join("analysis_reports")
        .join(format!("analysis-report-{run_id}.{}", format.extension()))
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}
