//! Typed errors for the orchestration pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so each stage surfaces
//! a strongly-typed failure the orchestrator can convert uniformly.

use thiserror::Error;

/// Errors that can occur while fetching and extracting article text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// URL is not a well-formed absolute URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Request could not be sent or the host was unreachable
    #[error("fetch failed: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Connection or response timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Non-success HTTP status from the page
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Response body could not be read as a document
    #[error("document parse failed: {0}")]
    Parse(String),
}

/// Errors from a downstream backend (analysis or formatting).
///
/// Both backends share one shape: unreachable, bad status, or undecodable.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend endpoint could not be reached
    #[error("backend unreachable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Backend returned a non-success status
    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    /// Backend response body was not valid structured data
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Top-level pipeline failure, tagged by the stage that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed inbound request, failed before any outbound call
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Text extraction stage failed
    #[error("text extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Analysis stage failed
    #[error("analysis failed: {0}")]
    Analyze(#[source] BackendError),

    /// Formatting stage failed
    #[error("formatting failed: {0}")]
    Format(#[source] BackendError),
}

impl PipelineError {
    /// HTTP status to report for this failure.
    ///
    /// Bad input is the caller's fault (400), a fetch timeout is a gateway
    /// timeout (504), and everything else downstream is a bad gateway (502).
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::InvalidRequest { .. } => 400,
            PipelineError::Extract(ExtractError::Timeout { .. }) => 504,
            PipelineError::Extract(_) => 502,
            PipelineError::Analyze(_) | PipelineError::Format(_) => 502,
        }
    }

    /// Generic, user-facing description of the failure.
    ///
    /// Never includes backend URLs, transport errors, or anything else a
    /// caller should not see.
    pub fn public_message(&self) -> String {
        match self {
            PipelineError::InvalidRequest { reason } => {
                format!("invalid request: {}", reason)
            }
            PipelineError::Extract(ExtractError::Timeout { .. }) => {
                "timed out retrieving the article".to_string()
            }
            PipelineError::Extract(_) => "could not retrieve the article text".to_string(),
            PipelineError::Analyze(_) => "rhetoric analysis is unavailable".to_string(),
            PipelineError::Format(_) => "response formatting is unavailable".to_string(),
        }
    }
}

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for backend calls.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = PipelineError::InvalidRequest {
            reason: "url is required".into(),
        };
        assert_eq!(invalid.status_code(), 400);

        let timeout = PipelineError::Extract(ExtractError::Timeout {
            url: "https://example.com".into(),
        });
        assert_eq!(timeout.status_code(), 504);

        let unreachable = PipelineError::Analyze(BackendError::Unavailable(
            "connection refused".into(),
        ));
        assert_eq!(unreachable.status_code(), 502);

        let bad_status = PipelineError::Format(BackendError::Status { status: 503 });
        assert_eq!(bad_status.status_code(), 502);
    }

    #[test]
    fn test_public_messages_do_not_leak() {
        let err = PipelineError::Analyze(BackendError::Unavailable(
            "tcp connect error: http://internal-host:8081".into(),
        ));
        let message = err.public_message();
        assert!(!message.contains("internal-host"));
        assert!(!message.contains("8081"));
    }
}
