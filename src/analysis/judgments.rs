//! Decoding of remote judgment responses.
//!
//! AI services wrap their answer in a `{returnCode, returnMessage}` envelope
//! where only `returnCode == 0` means success. The grammar and spell-check
//! services return their body directly. Anything malformed decodes to `None`
//! so the caller falls back to the judgment's neutral default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const CORRECTION_LEADING_PUNCTUATION: [char; 7] = ['.', ',', ':', '!', '?', ';', '-'];
const UTF8_BOM: char = '\u{FEFF}';

#[derive(Debug, Deserialize)]
struct ServiceEnvelope {
    #[serde(rename = "returnCode")]
    return_code: Option<i64>,
    #[serde(rename = "returnMessage", default)]
    return_message: Value,
}

fn envelope_message(body: &str, service: &'static str) -> Option<Value> {
    let envelope: ServiceEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::debug!(service, error = %err, "judgments: response is not an envelope");
            return None;
        }
    };
    if envelope.return_code != Some(0) {
        tracing::debug!(
            service,
            return_code = ?envelope.return_code,
            "judgments: service reported failure"
        );
        return None;
    }
    Some(envelope.return_message)
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Corrected text with a leading byte-order mark and one leading
/// punctuation character removed.
pub fn decode_correction(body: &str) -> Option<String> {
    let Value::String(text) = envelope_message(body, "grammar_correction")? else {
        return None;
    };
    let text = text.trim_start_matches(UTF8_BOM);
    let text = text
        .strip_prefix(|c: char| CORRECTION_LEADING_PUNCTUATION.contains(&c))
        .unwrap_or(text);
    Some(text.to_string())
}

/// Similarity in [0, 1] as an integer percent.
pub fn decode_relevance(body: &str) -> Option<u32> {
    let score = as_number(&envelope_message(body, "relevance")?)?;
    Some((score * 100.0).round().max(0.0) as u32)
}

/// Two-character CEFR code such as "B2".
pub fn decode_cefr_level(body: &str) -> Option<String> {
    let Value::String(level) = envelope_message(body, "cefr_level")? else {
        return None;
    };
    (level.chars().count() == 2).then_some(level)
}

pub fn decode_idea_count(body: &str) -> Option<u32> {
    match envelope_message(body, "idea_count")? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    object: String,
    #[serde(default)]
    embedding: Value,
}

/// The `embedding` vector of the first item, serialized back to JSON text.
pub fn decode_embedding(body: &str) -> Option<String> {
    let Value::String(data) = envelope_message(body, "embedding")? else {
        return None;
    };
    let items: Vec<EmbeddingItem> = serde_json::from_str(&data).ok()?;
    let first = items.into_iter().next()?;
    if first.object != "embedding" {
        return None;
    }
    serde_json::to_string(&first.embedding).ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckData {
    #[serde(default)]
    pub results: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckPayload {
    pub status: bool,
    #[serde(default)]
    pub data: Option<SpellCheckData>,
}

impl SpellCheckPayload {
    /// Per-word correctness flags; `None` when the check did not run.
    pub fn results(&self) -> Option<&[bool]> {
        if !self.status {
            return None;
        }
        self.data.as_ref().map(|data| data.results.as_slice())
    }
}

pub fn decode_spell_check(body: &str) -> Option<SpellCheckPayload> {
    let payload: SpellCheckPayload = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(error = %err, "judgments: malformed spell-check body");
            return None;
        }
    };
    if payload.status && payload.data.is_none() {
        tracing::debug!("judgments: spell-check body has status but no results");
        return None;
    }
    Some(payload)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Replacement {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrammarRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
}

/// One issue reported by the grammar checker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrammarMatch {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "shortMessage")]
    pub short_message: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub rule: Option<GrammarRule>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrammarCheckPayload {
    pub matches: Vec<GrammarMatch>,
}

pub fn decode_grammar_check(body: &str) -> Option<GrammarCheckPayload> {
    match serde_json::from_str(body) {
        Ok(payload) => Some(payload),
        Err(err) => {
            tracing::debug!(error = %err, "judgments: malformed grammar-check body");
            None
        }
    }
}
