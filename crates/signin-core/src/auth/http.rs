//! JSON-over-HTTP submitter.
//!
//! Posts `{"email", "password"}` to a login endpoint and maps the response
//! status onto a [`SubmitOutcome`].

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use super::{AuthSubmitter, Credentials, SubmitOutcome, USER_AGENT};

/// Submitter backed by a remote login endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitter {
    /// Creates a submitter for `endpoint`.
    ///
    /// `timeout` bounds the whole request; `None` leaves it unbounded.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl AuthSubmitter for HttpSubmitter {
    async fn submit(&self, credentials: Credentials) -> SubmitOutcome {
        let response = match self
            .client
            .post(&self.endpoint)
            .json(&credentials)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                return SubmitOutcome::service_error(format!("Request timed out: {err}"));
            }
            Err(err) => {
                return SubmitOutcome::service_error(format!("Failed to send login request: {err}"));
            }
        };

        let status = response.status();
        if status.is_success() {
            return SubmitOutcome::Success;
        }
        let body = response.text().await.unwrap_or_default();
        outcome_for_status(status.as_u16(), &body)
    }
}

/// Maps a non-success status onto an outcome.
fn outcome_for_status(status: u16, body: &str) -> SubmitOutcome {
    match status {
        401 | 403 => SubmitOutcome::InvalidCredentials,
        _ => SubmitOutcome::service_error(status_detail(status, body)),
    }
}

/// One-line summary of a failed response, preferring a JSON error message.
fn status_detail(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json.get("error")
            .and_then(|err| err.get("message").or(Some(err)))
            .or_else(|| json.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    match message {
        Some(msg) => format!("HTTP {status}: {msg}"),
        None if body.trim().is_empty() => format!("HTTP {status}"),
        None => format!("HTTP {status}: {}", body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_are_invalid_credentials() {
        assert_eq!(outcome_for_status(401, ""), SubmitOutcome::InvalidCredentials);
        assert_eq!(outcome_for_status(403, "nope"), SubmitOutcome::InvalidCredentials);
    }

    #[test]
    fn test_other_statuses_are_service_errors() {
        assert_eq!(
            outcome_for_status(503, ""),
            SubmitOutcome::service_error("HTTP 503")
        );
        assert_eq!(
            outcome_for_status(400, "bad request"),
            SubmitOutcome::service_error("HTTP 400: bad request")
        );
    }

    #[test]
    fn test_status_detail_extracts_json_message() {
        assert_eq!(
            status_detail(500, r#"{"error":{"message":"db down"}}"#),
            "HTTP 500: db down"
        );
        assert_eq!(
            status_detail(502, r#"{"error":"upstream closed"}"#),
            "HTTP 502: upstream closed"
        );
        assert_eq!(
            status_detail(429, r#"{"message":"slow down"}"#),
            "HTTP 429: slow down"
        );
    }
}
