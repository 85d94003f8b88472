//! Three-stage orchestration: fetch -> analyze -> format.
//!
//! The orchestrator owns stage sequencing and the partial-failure policy.
//! Failures never escape [`Orchestrator::process`]; every run produces a
//! [`ProcessOutcome`] tagged with the furthest stage reached.

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::PipelineError;
use crate::traits::{AnalysisBackend, FormattingBackend, TextFetcher};
use crate::types::{ProcessOutcome, Stage};

/// Sequences the pipeline over injected collaborators.
///
/// Collaborators are trait objects so each can be substituted with a test
/// double. The orchestrator holds no other state; concurrent `process` calls
/// share nothing mutable.
///
/// Partial-failure policy: fail-open. Whatever a completed stage produced is
/// preserved in the outcome even when a later stage fails.
pub struct Orchestrator {
    fetcher: Arc<dyn TextFetcher>,
    analyzer: Arc<dyn AnalysisBackend>,
    formatter: Arc<dyn FormattingBackend>,
}

impl Orchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        fetcher: Arc<dyn TextFetcher>,
        analyzer: Arc<dyn AnalysisBackend>,
        formatter: Arc<dyn FormattingBackend>,
    ) -> Self {
        Self {
            fetcher,
            analyzer,
            formatter,
        }
    }

    /// Run the full pipeline for one article URL.
    ///
    /// Stages run strictly in sequence; stage N+1 consumes stage N's output.
    /// An invalid URL fails before any outbound call is attempted.
    pub async fn process(&self, url: &str) -> ProcessOutcome {
        let parsed = match Self::validate_url(url) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(error = %error, "rejected article request");
                return ProcessOutcome::failed(Stage::Fetching, error, None, None);
            }
        };

        info!(url = %parsed, fetcher = self.fetcher.name(), "processing article");

        // Stage 1: retrieve the article text
        let text = match self.fetcher.fetch_text(&parsed).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %parsed, error = %e, "pipeline failed while fetching");
                return ProcessOutcome::failed(Stage::Fetching, e.into(), None, None);
            }
        };

        // Stage 2: analyze the rhetoric
        debug!(backend = self.analyzer.name(), "analysis stage starting");
        let analysis = match self.analyzer.analyze(&text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(url = %parsed, error = %e, "pipeline failed while analyzing");
                return ProcessOutcome::failed(
                    Stage::Analyzing,
                    PipelineError::Analyze(e),
                    Some(text),
                    None,
                );
            }
        };

        // Stage 3: format the analysis
        debug!(backend = self.formatter.name(), "formatting stage starting");
        let formatted = match self.formatter.format(&analysis).await {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(url = %parsed, error = %e, "pipeline failed while formatting");
                return ProcessOutcome::failed(
                    Stage::Formatting,
                    PipelineError::Format(e),
                    Some(text),
                    Some(analysis),
                );
            }
        };

        info!(url = %parsed, "article processed");
        ProcessOutcome::done(text, analysis, formatted)
    }

    /// Run only the fetch and analysis stages, returning the raw analysis.
    ///
    /// Legacy debug path kept from an earlier variant of the gateway that
    /// skipped formatting; the canonical path is [`Orchestrator::process`].
    pub async fn analyze_raw(&self, url: &str) -> ProcessOutcome {
        let parsed = match Self::validate_url(url) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(error = %error, "rejected article request");
                return ProcessOutcome::failed(Stage::Fetching, error, None, None);
            }
        };

        let text = match self.fetcher.fetch_text(&parsed).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %parsed, error = %e, "raw analysis failed while fetching");
                return ProcessOutcome::failed(Stage::Fetching, e.into(), None, None);
            }
        };

        match self.analyzer.analyze(&text).await {
            Ok(analysis) => ProcessOutcome {
                stage: Stage::Analyzing,
                text: Some(text),
                analysis: Some(analysis),
                formatted: None,
                error: None,
            },
            Err(e) => {
                warn!(url = %parsed, error = %e, "raw analysis failed while analyzing");
                ProcessOutcome::failed(
                    Stage::Analyzing,
                    PipelineError::Analyze(e),
                    Some(text),
                    None,
                )
            }
        }
    }

    fn validate_url(url: &str) -> Result<Url, PipelineError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::InvalidRequest {
                reason: "url is required".to_string(),
            });
        }

        Url::parse(trimmed).map_err(|_| PipelineError::InvalidRequest {
            reason: format!("url is not a well-formed absolute URL: {}", trimmed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, ExtractError};
    use crate::testing::{MockAnalysisBackend, MockFormattingBackend, MockTextFetcher};
    use serde_json::json;

    fn orchestrator(
        fetcher: MockTextFetcher,
        analyzer: MockAnalysisBackend,
        formatter: MockFormattingBackend,
    ) -> Orchestrator {
        Orchestrator::new(Arc::new(fetcher), Arc::new(analyzer), Arc::new(formatter))
    }

    #[tokio::test]
    async fn test_full_pipeline_success() {
        let fetcher = MockTextFetcher::new()
            .with_text("https://example.com/article", "Hello. World.");
        let analyzer =
            MockAnalysisBackend::new().with_analysis("Hello. World.", json!({"rhetoric": "ethos"}));
        let formatter = MockFormattingBackend::new()
            .with_formatted(json!({"rhetoric": "ethos"}), json!("Formatted: ethos"));

        let outcome = orchestrator(fetcher, analyzer, formatter)
            .process("https://example.com/article")
            .await;

        assert_eq!(outcome.stage, Stage::Done);
        assert_eq!(outcome.text.as_deref(), Some("Hello. World."));
        assert_eq!(outcome.analysis, Some(json!({"rhetoric": "ethos"})));
        assert_eq!(outcome.formatted, Some(json!("Formatted: ethos")));
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_url_fails_without_outbound_calls() {
        let fetcher = MockTextFetcher::new();
        let analyzer = MockAnalysisBackend::new();
        let formatter = MockFormattingBackend::new();

        let fetcher_handle = fetcher.clone();
        let analyzer_handle = analyzer.clone();
        let formatter_handle = formatter.clone();

        let outcome = orchestrator(fetcher, analyzer, formatter).process("   ").await;

        assert!(matches!(
            outcome.error,
            Some(PipelineError::InvalidRequest { .. })
        ));
        assert!(outcome.text.is_none());
        assert_eq!(fetcher_handle.fetch_calls().len(), 0);
        assert_eq!(analyzer_handle.analyze_calls().len(), 0);
        assert_eq!(formatter_handle.format_calls().len(), 0);
    }

    #[tokio::test]
    async fn test_relative_url_is_rejected() {
        let fetcher = MockTextFetcher::new();
        let fetcher_handle = fetcher.clone();

        let outcome = orchestrator(
            fetcher,
            MockAnalysisBackend::new(),
            MockFormattingBackend::new(),
        )
        .process("/articles/42")
        .await;

        assert!(matches!(
            outcome.error,
            Some(PipelineError::InvalidRequest { .. })
        ));
        assert_eq!(fetcher_handle.fetch_calls().len(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_outcome() {
        let fetcher = MockTextFetcher::new().with_error(|| ExtractError::Fetch(
            "connection refused".into(),
        ));

        let outcome = orchestrator(
            fetcher,
            MockAnalysisBackend::new(),
            MockFormattingBackend::new(),
        )
        .process("https://unreachable.example.com")
        .await;

        assert_eq!(outcome.stage, Stage::Fetching);
        assert!(outcome.text.is_none());
        assert!(outcome.analysis.is_none());
        assert!(outcome.formatted.is_none());
        assert!(matches!(outcome.error, Some(PipelineError::Extract(_))));
    }

    #[tokio::test]
    async fn test_analysis_failure_preserves_text() {
        let fetcher = MockTextFetcher::new().with_text("https://example.com", "Hello. World.");
        let analyzer = MockAnalysisBackend::new()
            .with_error(|| BackendError::Unavailable("connection refused".into()));
        let formatter = MockFormattingBackend::new();
        let formatter_handle = formatter.clone();

        let outcome = orchestrator(fetcher, analyzer, formatter)
            .process("https://example.com")
            .await;

        // Fail-open: the extracted text survives the analysis failure.
        assert_eq!(outcome.stage, Stage::Analyzing);
        assert_eq!(outcome.text.as_deref(), Some("Hello. World."));
        assert!(outcome.analysis.is_none());
        assert!(outcome.formatted.is_none());
        assert!(matches!(outcome.error, Some(PipelineError::Analyze(_))));
        assert_eq!(formatter_handle.format_calls().len(), 0);
    }

    #[tokio::test]
    async fn test_formatting_failure_preserves_text_and_analysis() {
        let fetcher = MockTextFetcher::new().with_text("https://example.com", "Hello. World.");
        let analyzer =
            MockAnalysisBackend::new().with_analysis("Hello. World.", json!({"score": 0.5}));
        let formatter =
            MockFormattingBackend::new().with_error(|| BackendError::Status { status: 503 });

        let outcome = orchestrator(fetcher, analyzer, formatter)
            .process("https://example.com")
            .await;

        assert_eq!(outcome.stage, Stage::Formatting);
        assert_eq!(outcome.text.as_deref(), Some("Hello. World."));
        assert_eq!(outcome.analysis, Some(json!({"score": 0.5})));
        assert!(outcome.formatted.is_none());
        assert!(matches!(outcome.error, Some(PipelineError::Format(_))));
    }

    #[tokio::test]
    async fn test_analysis_input_passed_through_unmodified() {
        let fetcher = MockTextFetcher::new().with_text("https://example.com", "input text");
        let analyzer = MockAnalysisBackend::new().with_analysis("input text", json!({"score": 0.5}));
        let analyzer_handle = analyzer.clone();
        let formatter = MockFormattingBackend::new()
            .with_formatted(json!({"score": 0.5}), json!("ok"));

        let outcome = orchestrator(fetcher, analyzer, formatter)
            .process("https://example.com")
            .await;

        assert_eq!(analyzer_handle.analyze_calls(), vec!["input text".to_string()]);
        assert_eq!(outcome.analysis, Some(json!({"score": 0.5})));
    }

    #[tokio::test]
    async fn test_repeat_runs_are_identical() {
        let fetcher = MockTextFetcher::new().with_text("https://example.com", "Hello. World.");
        let analyzer =
            MockAnalysisBackend::new().with_analysis("Hello. World.", json!({"rhetoric": "ethos"}));
        let formatter = MockFormattingBackend::new()
            .with_formatted(json!({"rhetoric": "ethos"}), json!("Formatted: ethos"));

        let orchestrator = orchestrator(fetcher, analyzer, formatter);

        let first = orchestrator.process("https://example.com").await.into_response();
        let second = orchestrator.process("https://example.com").await.into_response();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_analyze_raw_skips_formatting() {
        let fetcher = MockTextFetcher::new().with_text("https://example.com", "Hello. World.");
        let analyzer =
            MockAnalysisBackend::new().with_analysis("Hello. World.", json!({"rhetoric": "ethos"}));
        let formatter = MockFormattingBackend::new();
        let formatter_handle = formatter.clone();

        let outcome = orchestrator(fetcher, analyzer, formatter)
            .analyze_raw("https://example.com")
            .await;

        assert_eq!(outcome.stage, Stage::Analyzing);
        assert_eq!(outcome.analysis, Some(json!({"rhetoric": "ethos"})));
        assert!(outcome.formatted.is_none());
        assert!(outcome.error.is_none());
        assert_eq!(formatter_handle.format_calls().len(), 0);
    }
}
