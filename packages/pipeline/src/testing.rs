//! Testing utilities including mock implementations.
//!
//! These are useful for testing the orchestrator and the HTTP boundary
//! without making real network calls. Each mock returns canned responses and
//! records the calls made to it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use url::Url;

use crate::error::{BackendError, BackendResult, ExtractError, ExtractResult};
use crate::traits::{AnalysisBackend, FormattingBackend, TextFetcher};
use crate::types::{AnalysisResult, ArticleText, FormattedResult};

type ExtractErrorFactory = Arc<dyn Fn() -> ExtractError + Send + Sync>;
type BackendErrorFactory = Arc<dyn Fn() -> BackendError + Send + Sync>;

/// Mock text fetcher with canned text per URL.
///
/// # Example
///
/// ```rust
/// use pipeline::testing::MockTextFetcher;
///
/// let fetcher = MockTextFetcher::new()
///     .with_text("https://example.com/", "Hello. World.");
/// ```
#[derive(Default)]
pub struct MockTextFetcher {
    /// Canned text indexed by URL
    texts: Arc<RwLock<HashMap<String, ArticleText>>>,
    /// When set, every fetch fails with the produced error
    error: Arc<RwLock<Option<ExtractErrorFactory>>>,
    /// URLs requested, in order
    fetch_calls: Arc<RwLock<Vec<String>>>,
}

impl MockTextFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned text for a URL (builder pattern).
    ///
    /// The URL is stored in normalized form so lookups match however the
    /// orchestrator parsed it (e.g. a trailing slash on a bare host).
    pub fn with_text(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        let key = Url::parse(&url).map(|u| u.to_string()).unwrap_or(url);
        self.texts.write().unwrap().insert(key, text.into());
        self
    }

    /// Make every fetch fail with the produced error (builder pattern).
    pub fn with_error(self, factory: impl Fn() -> ExtractError + Send + Sync + 'static) -> Self {
        *self.error.write().unwrap() = Some(Arc::new(factory));
        self
    }

    /// Get the URLs that were requested.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.read().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.fetch_calls.write().unwrap().clear();
    }
}

impl Clone for MockTextFetcher {
    fn clone(&self) -> Self {
        Self {
            texts: Arc::clone(&self.texts),
            error: Arc::clone(&self.error),
            fetch_calls: Arc::clone(&self.fetch_calls),
        }
    }
}

#[async_trait]
impl TextFetcher for MockTextFetcher {
    async fn fetch_text(&self, url: &Url) -> ExtractResult<ArticleText> {
        self.fetch_calls.write().unwrap().push(url.to_string());

        if let Some(factory) = self.error.read().unwrap().as_ref() {
            return Err(factory());
        }

        let texts = self.texts.read().unwrap();
        match texts.get(url.as_str()) {
            Some(text) => Ok(text.clone()),
            None => Err(ExtractError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock analysis backend with canned results per input text.
///
/// Inputs without a canned result yield an empty JSON object, mirroring a
/// backend that found nothing to report.
#[derive(Default)]
pub struct MockAnalysisBackend {
    /// Canned analyses indexed by input text
    analyses: Arc<RwLock<HashMap<String, AnalysisResult>>>,
    error: Arc<RwLock<Option<BackendErrorFactory>>>,
    /// Texts submitted, in order
    analyze_calls: Arc<RwLock<Vec<String>>>,
}

impl MockAnalysisBackend {
    /// Create a new empty mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned analysis for an input text (builder pattern).
    pub fn with_analysis(self, text: impl Into<String>, analysis: AnalysisResult) -> Self {
        self.analyses
            .write()
            .unwrap()
            .insert(text.into(), analysis);
        self
    }

    /// Make every call fail with the produced error (builder pattern).
    pub fn with_error(self, factory: impl Fn() -> BackendError + Send + Sync + 'static) -> Self {
        *self.error.write().unwrap() = Some(Arc::new(factory));
        self
    }

    /// Get the texts that were submitted.
    pub fn analyze_calls(&self) -> Vec<String> {
        self.analyze_calls.read().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.analyze_calls.write().unwrap().clear();
    }
}

impl Clone for MockAnalysisBackend {
    fn clone(&self) -> Self {
        Self {
            analyses: Arc::clone(&self.analyses),
            error: Arc::clone(&self.error),
            analyze_calls: Arc::clone(&self.analyze_calls),
        }
    }
}

#[async_trait]
impl AnalysisBackend for MockAnalysisBackend {
    async fn analyze(&self, text: &str) -> BackendResult<AnalysisResult> {
        self.analyze_calls.write().unwrap().push(text.to_string());

        if let Some(factory) = self.error.read().unwrap().as_ref() {
            return Err(factory());
        }

        let analyses = self.analyses.read().unwrap();
        Ok(analyses
            .get(text)
            .cloned()
            .unwrap_or_else(|| serde_json::json!({})))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock formatting backend with canned results per analysis payload.
///
/// Payloads without a canned result are echoed back, mirroring a formatter
/// that has nothing to add.
#[derive(Default)]
pub struct MockFormattingBackend {
    /// Canned formatted results indexed by serialized analysis
    formats: Arc<RwLock<HashMap<String, FormattedResult>>>,
    error: Arc<RwLock<Option<BackendErrorFactory>>>,
    /// Analyses submitted, in order
    format_calls: Arc<RwLock<Vec<AnalysisResult>>>,
}

impl MockFormattingBackend {
    /// Create a new empty mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned formatted result for an analysis payload (builder pattern).
    pub fn with_formatted(self, analysis: AnalysisResult, formatted: FormattedResult) -> Self {
        let key = analysis.to_string();
        self.formats.write().unwrap().insert(key, formatted);
        self
    }

    /// Make every call fail with the produced error (builder pattern).
    pub fn with_error(self, factory: impl Fn() -> BackendError + Send + Sync + 'static) -> Self {
        *self.error.write().unwrap() = Some(Arc::new(factory));
        self
    }

    /// Get the analysis payloads that were submitted.
    pub fn format_calls(&self) -> Vec<AnalysisResult> {
        self.format_calls.read().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.format_calls.write().unwrap().clear();
    }
}

impl Clone for MockFormattingBackend {
    fn clone(&self) -> Self {
        Self {
            formats: Arc::clone(&self.formats),
            error: Arc::clone(&self.error),
            format_calls: Arc::clone(&self.format_calls),
        }
    }
}

#[async_trait]
impl FormattingBackend for MockFormattingBackend {
    async fn format(&self, analysis: &AnalysisResult) -> BackendResult<FormattedResult> {
        self.format_calls.write().unwrap().push(analysis.clone());

        if let Some(factory) = self.error.read().unwrap().as_ref() {
            return Err(factory());
        }

        let formats = self.formats.read().unwrap();
        Ok(formats
            .get(&analysis.to_string())
            .cloned()
            .unwrap_or_else(|| analysis.clone()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
