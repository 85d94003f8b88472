//! Capability seams for the pipeline's external collaborators.
//!
//! Each stage talks to the outside world through one of these traits, so the
//! orchestrator can be exercised with test doubles (see [`crate::testing`])
//! instead of live HTTP endpoints.

use async_trait::async_trait;
use url::Url;

use crate::error::{BackendResult, ExtractResult};
use crate::types::{AnalysisResult, ArticleText, FormattedResult};

/// Fetches a page and reduces it to plain visible text.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Fetch `url` once and return its visible text with markup, scripts,
    /// and styles stripped. No retries, no caching.
    async fn fetch_text(&self, url: &Url) -> ExtractResult<ArticleText>;

    /// Implementation name for logging.
    fn name(&self) -> &str;
}

/// Submits article text to the rhetoric-analysis backend.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// POST `text` for analysis and return the decoded result unmodified.
    /// The result's schema is owned by the backend, not validated here.
    async fn analyze(&self, text: &str) -> BackendResult<AnalysisResult>;

    /// Implementation name for logging.
    fn name(&self) -> &str;
}

/// Turns an analysis result into a display-ready representation.
#[async_trait]
pub trait FormattingBackend: Send + Sync {
    /// POST the analysis payload and return the formatted response body.
    async fn format(&self, analysis: &AnalysisResult) -> BackendResult<FormattedResult>;

    /// Implementation name for logging.
    fn name(&self) -> &str;
}
