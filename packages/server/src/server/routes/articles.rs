//! Article processing routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipeline::{ArticleRequest, PipelineError};
use serde_json::{json, Value};

use crate::server::app::AppState;

fn status_for(error: &PipelineError) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Canonical three-stage pipeline: fetch, analyze, format.
///
/// Always answers with a well-formed `ArticleResponse`; on failure the
/// response carries whatever earlier stages produced (fail-open) plus a
/// generic `message`, under the status mapped from the failure.
pub async fn process_article_handler(
    State(state): State<AppState>,
    Json(request): Json<ArticleRequest>,
) -> Response {
    let outcome = state.orchestrator.process(&request.url).await;

    let status = match outcome.error.as_ref() {
        None => StatusCode::OK,
        Some(error) => {
            tracing::debug!(stage = outcome.stage.as_str(), "pipeline did not complete");
            status_for(error)
        }
    };

    (status, Json(outcome.into_response())).into_response()
}

/// Legacy debug route: fetch + analyze, answering with the raw analysis JSON.
///
/// Registered only when `GATEWAY_RAW_ANALYSIS_ROUTE` is enabled; kept from an
/// earlier gateway variant that skipped the formatting stage.
pub async fn analyze_article_handler(
    State(state): State<AppState>,
    Json(request): Json<ArticleRequest>,
) -> Response {
    let outcome = state.orchestrator.analyze_raw(&request.url).await;

    match outcome.error {
        None => {
            let analysis = outcome.analysis.unwrap_or(Value::Null);
            (StatusCode::OK, Json(analysis)).into_response()
        }
        Some(error) => {
            let status = status_for(&error);
            (
                status,
                Json(json!({ "message": error.public_message() })),
            )
                .into_response()
        }
    }
}
