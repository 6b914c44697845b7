use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Language;
use crate::error::AnalysisError;
use crate::pipeline::traits::JudgmentSource;

/// Service responses captured ahead of time, one optional body per service.
///
/// A body may be given as a JSON string (used verbatim) or as any other JSON
/// value (serialized back to text), so fixtures can embed payloads directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedResponses {
    pub grammar_correction: Option<Value>,
    pub spell_check: Option<Value>,
    pub grammar_check: Option<Value>,
    pub relevance: Option<Value>,
    pub cefr_level: Option<Value>,
    pub idea_count: Option<Value>,
    pub embedding: Option<Value>,
}

/// Replays [`RecordedResponses`]; a missing response is reported as an
/// unavailable service.
pub struct RecordedJudgments {
    responses: RecordedResponses,
}

impl RecordedJudgments {
    pub fn new(responses: RecordedResponses) -> Self {
        Self { responses }
    }

    fn replay(service: &'static str, recorded: &Option<Value>) -> Result<String, AnalysisError> {
        match recorded {
            Some(Value::String(body)) => Ok(body.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(AnalysisError::service_unavailable(
                service,
                "no recorded response",
            )),
        }
    }
}

impl JudgmentSource for RecordedJudgments {
    fn grammar_correct(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::replay("grammar_correction", &self.responses.grammar_correction)
    }

    fn spell_check(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::replay("spell_check", &self.responses.spell_check)
    }

    fn grammar_check(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::replay("grammar_check", &self.responses.grammar_check)
    }

    fn relevance(
        &self,
        _text: &str,
        _reference_embedding: &str,
        _language: &Language,
    ) -> Result<String, AnalysisError> {
        Self::replay("relevance", &self.responses.relevance)
    }

    fn cefr_level(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::replay("cefr_level", &self.responses.cefr_level)
    }

    fn idea_count(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::replay("idea_count", &self.responses.idea_count)
    }

    fn embedding(&self, _text: &str, _language: &Language) -> Result<String, AnalysisError> {
        Self::replay("embedding", &self.responses.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_bodies_are_replayed_verbatim() {
        let responses: RecordedResponses =
            serde_json::from_str(r#"{"cefr_level": "{\"returnCode\":0,\"returnMessage\":\"A2\"}"}"#)
                .expect("valid responses");
        let judgments = RecordedJudgments::new(responses);
        let lang = Language::parse("en-GB").unwrap();
        assert_eq!(
            judgments.cefr_level("x", &lang).unwrap(),
            r#"{"returnCode":0,"returnMessage":"A2"}"#
        );
    }

    #[test]
    fn object_bodies_are_serialized() {
        let responses: RecordedResponses =
            serde_json::from_str(r#"{"spell_check": {"status": false}}"#).expect("valid responses");
        let judgments = RecordedJudgments::new(responses);
        let lang = Language::parse("en-US").unwrap();
        assert_eq!(
            judgments.spell_check("x", &lang).unwrap(),
            r#"{"status":false}"#
        );
    }

    #[test]
    fn missing_response_is_unavailable() {
        let judgments = RecordedJudgments::new(RecordedResponses::default());
        let lang = Language::parse("en-US").unwrap();
        assert!(judgments.embedding("x", &lang).is_err());
    }
}
