// Main entry point for the rhetoric gateway

use std::sync::Arc;

use anyhow::{Context, Result};
use pipeline::{HttpAnalysisBackend, HttpFormattingBackend, HttpTextFetcher, Orchestrator};
use server_core::{
    server::{build_app, RouterOptions},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rhetoric Gateway");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        analysis = %config.rhetoric_detection_url,
        formatter = %config.response_formatter_url,
        "Configuration loaded"
    );

    // Wire the pipeline collaborators
    let fetcher = HttpTextFetcher::with_timeout_secs(config.text_retrieval_timeout_secs)
        .with_user_agent("RhetoricGateway/1.0");
    let analyzer = HttpAnalysisBackend::new(config.rhetoric_detection_url.clone());
    let formatter = HttpFormattingBackend::new(config.response_formatter_url.clone());

    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(fetcher),
        Arc::new(analyzer),
        Arc::new(formatter),
    ));

    // Build application
    let app = build_app(
        orchestrator,
        RouterOptions {
            allowed_origins: config.allowed_origins.clone(),
            request_timeout_secs: config.request_timeout_secs,
            raw_analysis_route: config.raw_analysis_route,
        },
    );

    if config.raw_analysis_route {
        tracing::warn!("legacy raw-analysis route enabled at /api/articles/analyze");
    }

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
