use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Language codes the analyzer knows how to tokenize.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "en-US", "en-GB", "en-AU", "en-NZ", "en-ZA", "en-IN", "en-IE", "en-WL", "en-AB", "ar-AE",
    "ar-SA", "bg-BG", "cs-CZ", "da-DK", "de-AT", "de-CH", "de-DE", "el-GR", "es-ES", "es-US",
    "eu-ES", "fa-IR", "fi-FI", "fil-PH", "fr-CA", "fr-FR", "gl-ES", "he-IL", "hi-IN", "hr-HR",
    "hu-HU", "id-ID", "is-IS", "it-IT", "ja-JP", "ko-KR", "lt-LT", "lv-LV", "mi-NZ", "mk-MK",
    "ms-MY", "nl-NL", "no-NO", "pl-PL", "ps-AF", "pt-BR", "pt-PT", "ro-RO", "ru-RU", "sk-SK",
    "sl-SI", "sr-RS", "sv-SE", "ta-IN", "te-IN", "th-TH", "tr-TR", "uk-UA", "vi-VN", "zh-CN",
];

/// Languages whose transcripts are counted by spaces rather than split on
/// punctuation-aware word boundaries.
const SPACE_COUNTING_LANGUAGES: &[&str] = &["ar-AE", "ar-SA"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    DelimiterBased,
    SpaceCounting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    code: String,
}

impl Language {
    pub fn parse(code: &str) -> Result<Self, AnalysisError> {
        let trimmed = code.trim();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(trimmed))
            .map(|known| Self {
                code: (*known).to_string(),
            })
            .ok_or_else(|| AnalysisError::config(format!("unknown language code '{trimmed}'")))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_english(&self) -> bool {
        self.code.starts_with("en")
    }

    pub fn tokenizer_kind(&self) -> TokenizerKind {
        if SPACE_COUNTING_LANGUAGES.contains(&self.code.as_str()) {
            TokenizerKind::SpaceCounting
        } else {
            TokenizerKind::DelimiterBased
        }
    }

    /// Code sent to the grammar and spell-check services, which know Arabic
    /// only as a single language.
    pub fn service_code(&self) -> &str {
        match self.code.as_str() {
            "ar-AE" | "ar-SA" => "ar",
            other => other,
        }
    }
}

/// Starting value of the longest/average sentence lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceFloor {
    /// Both start at 1, so a passage with no sentences reports 1/1.
    #[default]
    One,
    Zero,
}

impl SentenceFloor {
    pub fn initial(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Zero => 0,
        }
    }
}

/// How a target word is looked for in the learner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetWordMatch {
    /// Substring of the normalized text; "cat" is found inside "category".
    #[default]
    Substring,
    /// Contiguous run of whole normalized tokens.
    WholeToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub language: String,
    /// Alternatives table, one equivalence class per line, members separated
    /// by `|`. A `*` member marks the rest of the line as wildcards.
    pub alternatives: String,
    /// Read the alternatives table from this file instead of `alternatives`.
    pub alternatives_path: Option<String>,
    pub sentence_floor: SentenceFloor,
    pub target_word_match: TargetWordMatch,
    pub max_alignment_words: usize,
}

impl AnalysisConfig {
    pub const DEFAULT_LANGUAGE: &'static str = "en-US";
    pub const DEFAULT_MAX_ALIGNMENT_WORDS: usize = 2_000;

    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::io("read analysis config", e))?;
        serde_json::from_str(&data).map_err(|e| AnalysisError::json("parse analysis config", e))
    }

    pub(crate) fn alternatives_table(&self) -> Result<String, AnalysisError> {
        match self.alternatives_path.as_deref() {
            Some(path) if !path.is_empty() => std::fs::read_to_string(path)
                .map_err(|e| AnalysisError::io("read alternatives table", e)),
            _ => Ok(self.alternatives.clone()),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: Self::DEFAULT_LANGUAGE.to_string(),
            alternatives: String::new(),
            alternatives_path: None,
            sentence_floor: SentenceFloor::default(),
            target_word_match: TargetWordMatch::default(),
            max_alignment_words: Self::DEFAULT_MAX_ALIGNMENT_WORDS,
        }
    }
}
