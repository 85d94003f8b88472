//! HTTP clients for the downstream backends.
//!
//! Both backends are opaque: the clients move payloads across the wire and
//! map transport failures, nothing more.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BackendError, BackendResult};
use crate::traits::{AnalysisBackend, FormattingBackend};
use crate::types::{AnalysisResult, FormattedResult};

/// Request body for the analysis backend.
#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// Client for the rhetoric-detection backend.
///
/// POSTs `{ "text": "<article text>" }` and returns the decoded JSON body
/// unmodified; the result's schema belongs to the backend.
#[derive(Clone)]
pub struct HttpAnalysisBackend {
    http_client: Client,
    endpoint: String,
}

impl HttpAnalysisBackend {
    /// Create a client for the given analysis endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Set a custom HTTP client (for shared connection pools or timeouts).
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn analyze(&self, text: &str) -> BackendResult<AnalysisResult> {
        debug!(text_length = text.len(), "submitting text for analysis");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "analysis backend unreachable");
                BackendError::Unavailable(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "analysis backend returned non-success status");
            return Err(BackendError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Unavailable(Box::new(e)))?;

        let analysis: Value = serde_json::from_str(&body)?;
        debug!("analysis received");

        Ok(analysis)
    }

    fn name(&self) -> &str {
        "rhetoric-detection"
    }
}

/// Client for the response-formatter backend.
///
/// POSTs the analysis payload as JSON and returns the raw response body; a
/// body that is not JSON comes back as a plain string value.
#[derive(Clone)]
pub struct HttpFormattingBackend {
    http_client: Client,
    endpoint: String,
}

impl HttpFormattingBackend {
    /// Create a client for the given formatter endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormattingBackend for HttpFormattingBackend {
    async fn format(&self, analysis: &AnalysisResult) -> BackendResult<FormattedResult> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(analysis)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "formatting backend unreachable");
                BackendError::Unavailable(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "formatting backend returned non-success status");
            return Err(BackendError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Unavailable(Box::new(e)))?;

        // The formatter may answer with JSON or plain text; accept both.
        let formatted = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
        debug!("formatted response received");

        Ok(formatted)
    }

    fn name(&self) -> &str {
        "response-formatter"
    }
}
