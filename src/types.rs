use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::judgments::GrammarMatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    /// 0-based index in the source sequence.
    pub position: usize,
}

impl Token {
    pub fn new(word: impl Into<String>, position: usize) -> Self {
        Self {
            word: word.into(),
            position,
        }
    }
}

/// Per-reference-position alignment outcome. One tag per reference token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentTag {
    Matched {
        candidate_position: usize,
        /// The tokens differ and matched through an alternative or wildcard.
        alternate: bool,
    },
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub word: String,
    /// 1-based reference position.
    #[serde(rename = "wordnumber")]
    pub word_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub word: String,
    /// 1-based reference position.
    #[serde(rename = "pposition")]
    pub reference_position: usize,
    /// 0-based candidate position.
    #[serde(rename = "tposition")]
    pub candidate_position: usize,
    #[serde(rename = "altmatch")]
    pub alternate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotationResult {
    pub errors: BTreeMap<usize, ErrorRecord>,
    pub matches: BTreeMap<usize, MatchRecord>,
    pub insertion_estimate: usize,
}

impl AnnotationResult {
    pub fn error_count(&self) -> usize {
        self.errors.len() + self.insertion_estimate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceStats {
    #[serde(rename = "sentencetotal")]
    pub count: u32,
    #[serde(rename = "sentenceaverage")]
    pub average_words: u32,
    #[serde(rename = "sentencelongest")]
    pub longest_words: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordStats {
    #[serde(rename = "wordstotal")]
    pub total_words: u32,
    #[serde(rename = "wordsunique")]
    pub unique_words: u32,
    #[serde(rename = "wordslong")]
    pub long_words: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub turns: u32,
    pub words: u32,
    #[serde(rename = "avturn")]
    pub average_turn: u32,
    #[serde(rename = "longestturn")]
    pub longest_turn: u32,
    #[serde(rename = "targetwords")]
    pub target_words_used: u32,
    #[serde(rename = "totaltargetwords")]
    pub total_target_words: u32,
    /// Filled in by the transcript comparison step; always -1 here.
    #[serde(rename = "aiaccuracy")]
    pub ai_accuracy: i32,
}

impl Default for TurnStats {
    fn default() -> Self {
        Self {
            turns: 0,
            words: 0,
            average_turn: 0,
            longest_turn: 0,
            target_words_used: 0,
            total_target_words: 0,
            ai_accuracy: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSpellStats {
    /// Raw spell-check body, empty when the service gave nothing usable.
    #[serde(rename = "autospell")]
    pub spelling_payload: String,
    /// Raw grammar-check body, empty when the service gave nothing usable.
    #[serde(rename = "autogrammar")]
    pub grammar_payload: String,
    #[serde(rename = "autospellscore")]
    pub spelling_score: u32,
    #[serde(rename = "autogrammarscore")]
    pub grammar_score: u32,
    #[serde(rename = "autospellerrors")]
    pub spelling_errors: u32,
    #[serde(rename = "autogrammarerrors")]
    pub grammar_errors: u32,
}

impl Default for GrammarSpellStats {
    fn default() -> Self {
        Self {
            spelling_payload: String::new(),
            grammar_payload: String::new(),
            spelling_score: 100,
            grammar_score: 100,
            spelling_errors: 0,
            grammar_errors: 0,
        }
    }
}

/// Flat metrics record for one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(flatten)]
    pub turns: TurnStats,
    #[serde(rename = "ideacount")]
    pub idea_count: u32,
    #[serde(rename = "cefrlevel")]
    pub cefr_level: String,
    /// Integer percent, 0 when no relevance judgment was made.
    pub relevance: u32,
    #[serde(flatten)]
    pub sentences: SentenceStats,
    #[serde(flatten)]
    pub words: WordStats,
    #[serde(flatten)]
    pub grammar_spell: GrammarSpellStats,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrammarCorrection {
    pub correction: Option<String>,
    pub annotation: Option<AnnotationResult>,
    pub error_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelReferenceStats {
    pub embedding: Option<String>,
    pub idea_count: Option<u32>,
}

/// Decoded grammar issues for display next to a transcript.
pub type GrammarErrors = Vec<GrammarMatch>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_count_adds_insertion_estimate() {
        let mut result = AnnotationResult {
            insertion_estimate: 2,
            ..AnnotationResult::default()
        };
        result.errors.insert(
            3,
            ErrorRecord {
                word: "go".to_string(),
                word_number: 3,
            },
        );
        assert_eq!(result.error_count(), 3);
    }

    #[test]
    fn annotation_serializes_integer_positions_as_keys() {
        let mut result = AnnotationResult::default();
        result.matches.insert(
            1,
            MatchRecord {
                word: "i".to_string(),
                reference_position: 1,
                candidate_position: 0,
                alternate: false,
            },
        );
        let json = serde_json::to_value(&result).expect("serializable");
        assert_eq!(json["matches"]["1"]["pposition"], 1);
        assert_eq!(json["matches"]["1"]["tposition"], 0);
        assert_eq!(json["matches"]["1"]["altmatch"], false);
        assert_eq!(json["insertion_estimate"], 0);
    }

    #[test]
    fn metrics_record_serializes_flat() {
        let record = MetricsRecord {
            turns: TurnStats::default(),
            idea_count: 0,
            cefr_level: String::new(),
            relevance: 0,
            sentences: SentenceStats {
                count: 0,
                average_words: 1,
                longest_words: 1,
            },
            words: WordStats::default(),
            grammar_spell: GrammarSpellStats::default(),
        };
        let json = serde_json::to_value(&record).expect("serializable");
        assert_eq!(json["aiaccuracy"], -1);
        assert_eq!(json["sentencelongest"], 1);
        assert_eq!(json["wordstotal"], 0);
        assert_eq!(json["autogrammarscore"], 100);
        assert_eq!(json["autospellscore"], 100);
        assert_eq!(json["cefrlevel"], "");
    }
}
