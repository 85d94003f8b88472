//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use pipeline::Orchestrator;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::server::routes::{analyze_article_handler, health_handler, process_article_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Router-level options that come from configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// CORS origin allow-list; empty means permissive (development)
    pub allowed_origins: Vec<String>,
    /// Inbound request timeout, seconds (0 disables the layer)
    pub request_timeout_secs: u64,
    /// Register the legacy raw-analysis debug route
    pub raw_analysis_route: bool,
}

/// Build the CORS layer from the configured origin allow-list.
///
/// Origins are exact values (e.g. `chrome-extension://<id>`,
/// `http://localhost:3000`). An empty list or `*` allows any origin.
fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(tower_http::cors::Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
///
/// The orchestrator arrives fully wired (fetcher + backends) so tests can
/// pass one built over mocks.
pub fn build_app(orchestrator: Arc<Orchestrator>, options: RouterOptions) -> Router {
    let state = AppState { orchestrator };

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/articles/process", post(process_article_handler));

    // Legacy debug path: raw analysis without the formatting stage.
    if options.raw_analysis_route {
        router = router.route("/api/articles/analyze", post(analyze_article_handler));
    }

    let mut router = router
        .layer(build_cors(&options.allowed_origins))
        .layer(TraceLayer::new_for_http());

    if options.request_timeout_secs > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            options.request_timeout_secs,
        )));
    }

    router.with_state(state)
}
