//! HTTP transport: one round trip per user turn.
//!
//! No retries, no backoff, no streaming. Every outcome is folded into a
//! [`RequestResult`] so the session can always append an assistant message.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use duochat_core::config::schema::DEFAULT_TIMEOUT_SECS;
use duochat_core::utils::truncate_string;
use duochat_core::ChatError;

use crate::request::PreparedRequest;

/// Outcome of a single provider call.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestResult {
    /// 2xx with a JSON body.
    Success(Value),
    /// Non-2xx status, network error, timeout, or unparseable body.
    Failure(String),
}

impl RequestResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestResult::Success(_))
    }

    pub fn into_result(self) -> Result<Value, ChatError> {
        match self {
            RequestResult::Success(body) => Ok(body),
            RequestResult::Failure(description) => Err(ChatError::TransportFailure(description)),
        }
    }
}

/// Something that can deliver a [`PreparedRequest`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> RequestResult;
}

// ─────────────────────────────────────────────
// HttpTransport
// ─────────────────────────────────────────────

/// `reqwest`-backed transport with a fixed per-request timeout.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }

    /// Transport with the default 30 second timeout.
    pub fn with_default_timeout() -> Result<Self, ChatError> {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PreparedRequest) -> RequestResult {
        let result = self
            .client
            .post(&request.url)
            .headers(request.headers.clone())
            .json(&request.body)
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                error!(url = %request.url, timeout = ?self.timeout, "request timed out");
                return RequestResult::Failure(format!(
                    "request timed out after {}s: {e}",
                    self.timeout.as_secs()
                ));
            }
            Err(e) => {
                error!(url = %request.url, error = %e, "HTTP request failed");
                return RequestResult::Failure(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                error!(status = %status, error = %e, "failed to read response body");
                return RequestResult::Failure(format!("HTTP {status}: failed to read body: {e}"));
            }
        };

        if !status.is_success() {
            error!(status = %status, body = %truncate_string(&text, 200), "API error");
            return RequestResult::Failure(format!("HTTP {status}: {text}"));
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => {
                debug!(status = %status, bytes = text.len(), "response received");
                RequestResult::Success(body)
            }
            Err(e) => {
                error!(error = %e, "response body is not JSON");
                RequestResult::Failure(format!("invalid JSON in response: {e}"))
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
