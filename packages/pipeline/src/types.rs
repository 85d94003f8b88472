//! Data types crossing the pipeline boundary.
//!
//! The analysis and formatting payloads are deliberately opaque
//! (`serde_json::Value`): the gateway passes them through without
//! interpreting or validating their schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PipelineError;

/// Plain text extracted from an article page.
///
/// May be empty when the page has no visible text; that is not an error.
pub type ArticleText = String;

/// Structured result from the analysis backend, passed through unmodified.
pub type AnalysisResult = Value;

/// Display-ready result from the formatting backend. A backend that returns
/// plain text is represented as `Value::String`.
pub type FormattedResult = Value;

/// Inbound request to process an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRequest {
    /// URL of the article to analyze
    pub url: String,
}

/// Aggregated response returned to the caller.
///
/// Fields are independently nullable: each is present exactly when the
/// corresponding stage completed. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ArticleText>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<FormattedResult>,

    /// User-facing error description, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pipeline stages in execution order.
///
/// `Done` is the terminal success state; a failure leaves the outcome tagged
/// with the stage that was executing when the error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Fetching,
    Analyzing,
    Formatting,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetching => "fetching",
            Stage::Analyzing => "analyzing",
            Stage::Formatting => "formatting",
            Stage::Done => "done",
        }
    }
}

/// The single tagged result of one orchestration run.
///
/// Invariant: the populated fields correspond exactly to the stages that
/// completed, and `error` is `Some` iff the run stopped on a failure.
/// Partial results are preserved on failure (fail-open).
#[derive(Debug)]
pub struct ProcessOutcome {
    /// Furthest stage the pipeline reached
    pub stage: Stage,
    pub text: Option<ArticleText>,
    pub analysis: Option<AnalysisResult>,
    pub formatted: Option<FormattedResult>,
    pub error: Option<PipelineError>,
}

impl ProcessOutcome {
    /// Outcome for a fully completed pipeline.
    pub fn done(text: ArticleText, analysis: AnalysisResult, formatted: FormattedResult) -> Self {
        Self {
            stage: Stage::Done,
            text: Some(text),
            analysis: Some(analysis),
            formatted: Some(formatted),
            error: None,
        }
    }

    /// Outcome for a pipeline that failed at `stage`, keeping whatever was
    /// already obtained.
    pub fn failed(
        stage: Stage,
        error: PipelineError,
        text: Option<ArticleText>,
        analysis: Option<AnalysisResult>,
    ) -> Self {
        Self {
            stage,
            text,
            analysis,
            formatted: None,
            error: Some(error),
        }
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Convert into the wire response, attaching the public error message
    /// when the run did not complete.
    pub fn into_response(self) -> ArticleResponse {
        ArticleResponse {
            text: self.text,
            analysis: self.analysis,
            formatted: self.formatted,
            message: self.error.as_ref().map(|e| e.public_message()),
        }
    }
}
