//! Article orchestration pipeline.
//!
//! Given an article URL, the pipeline fetches the page, reduces it to visible
//! text, submits the text to a rhetoric-analysis backend, and forwards the
//! analysis to a formatting backend. The library owns the sequencing and the
//! partial-failure policy; the backends are opaque HTTP collaborators.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pipeline::{Orchestrator, HttpTextFetcher, HttpAnalysisBackend, HttpFormattingBackend};
//!
//! let orchestrator = Orchestrator::new(
//!     Arc::new(HttpTextFetcher::new()),
//!     Arc::new(HttpAnalysisBackend::new("http://localhost:8081/analyze")),
//!     Arc::new(HttpFormattingBackend::new("http://localhost:8082/format")),
//! );
//!
//! let outcome = orchestrator.process("https://example.com/article").await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability seams (TextFetcher, AnalysisBackend, FormattingBackend)
//! - [`types`] - Request/response payloads and the tagged pipeline outcome
//! - [`fetcher`] - HTTP text fetcher with HTML-to-text reduction
//! - [`backends`] - reqwest clients for the analysis and formatting backends
//! - [`orchestrator`] - Three-stage sequencing and failure conversion
//! - [`testing`] - Mock implementations for testing

pub mod backends;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use backends::{HttpAnalysisBackend, HttpFormattingBackend};
pub use error::{BackendError, ExtractError, PipelineError};
pub use fetcher::HttpTextFetcher;
pub use orchestrator::Orchestrator;
pub use traits::{AnalysisBackend, FormattingBackend, TextFetcher};
pub use types::{AnalysisResult, ArticleRequest, ArticleResponse, ArticleText, ProcessOutcome, Stage};
