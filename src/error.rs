use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration error: {message}")]
    Config { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("{service} service unavailable: {message}")]
    ServiceUnavailable {
        service: &'static str,
        message: String,
    },
}

impl AnalysisError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn service_unavailable(service: &'static str, message: impl std::fmt::Display) -> Self {
        Self::ServiceUnavailable {
            service,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_unavailable_message_names_service() {
        let err = AnalysisError::service_unavailable("cefr", "timed out");
        assert_eq!(err.to_string(), "cefr service unavailable: timed out");
    }

    #[test]
    fn config_error_display() {
        let err = AnalysisError::config("unknown language code 'xx-YY'");
        assert_eq!(
            err.to_string(),
            "configuration error: unknown language code 'xx-YY'"
        );
    }
}
