//! HTTP sink for the illustration API.

use std::time::Duration;

use gleaner_core::models::config::ApiConfig;
use gleaner_core::{IllustrationSink, Record, SinkError, SubmitOutcome};
use serde_json::Value;
use tracing::debug;

/// Posts records to the illustration endpoint with a bearer token.
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HttpSink {
    /// Build a sink from configuration, reading the token from the
    /// configured environment variable.
    pub fn from_config(config: &ApiConfig) -> Result<Self, SinkError> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SinkError::MissingToken(config.token_env.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token,
        })
    }
}

impl IllustrationSink for HttpSink {
    async fn submit(&self, record: &Record) -> Result<SubmitOutcome, SinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(record)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        debug!("POST {} -> {}", self.endpoint, status);
        Ok(classify_response(status, &body))
    }
}

/// Map an API response onto a submission outcome.
///
/// 409 means the illustration already exists; any 2xx is a create.
pub fn classify_response(status: u16, body: &str) -> SubmitOutcome {
    match status {
        409 => SubmitOutcome::Duplicate(response_id(body)),
        200..=299 => SubmitOutcome::Created(response_id(body)),
        _ => SubmitOutcome::Rejected {
            status,
            body: body.to_string(),
        },
    }
}

fn response_id(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_created_with_string_id() {
        assert_eq!(
            classify_response(201, r#"{"id": "abc-123"}"#),
            SubmitOutcome::Created(Some("abc-123".to_string()))
        );
    }

    #[test]
    fn test_created_with_numeric_id() {
        assert_eq!(
            classify_response(200, r#"{"id": 42, "title": "x"}"#),
            SubmitOutcome::Created(Some("42".to_string()))
        );
    }

    #[test]
    fn test_created_without_body() {
        assert_eq!(classify_response(204, ""), SubmitOutcome::Created(None));
    }

    #[test]
    fn test_conflict_is_duplicate() {
        assert_eq!(
            classify_response(409, r#"{"id": 7}"#),
            SubmitOutcome::Duplicate(Some("7".to_string()))
        );
        assert_eq!(classify_response(409, "conflict"), SubmitOutcome::Duplicate(None));
    }

    #[test]
    fn test_other_status_is_rejected() {
        assert_eq!(
            classify_response(422, "bad tags"),
            SubmitOutcome::Rejected {
                status: 422,
                body: "bad tags".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_token() {
        let config = ApiConfig {
            token_env: "GLEANER_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
            ..ApiConfig::default()
        };

        assert!(matches!(
            HttpSink::from_config(&config),
            Err(SinkError::MissingToken(name)) if name == "GLEANER_TEST_TOKEN_THAT_IS_NEVER_SET"
        ));
    }
}
