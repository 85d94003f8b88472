use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Endpoint of the rhetoric-detection backend
    pub rhetoric_detection_url: String,
    /// Endpoint of the response-formatter backend
    pub response_formatter_url: String,
    /// Timeout for fetching article pages, seconds
    pub text_retrieval_timeout_secs: u64,
    /// Timeout applied to inbound requests, seconds
    pub request_timeout_secs: u64,
    /// CORS origin allow-list; empty means permissive (development)
    pub allowed_origins: Vec<String>,
    /// Register the legacy raw-analysis debug route
    pub raw_analysis_route: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            rhetoric_detection_url: env::var("RHETORIC_DETECTION_URL")
                .context("RHETORIC_DETECTION_URL must be set")?,
            response_formatter_url: env::var("RESPONSE_FORMATTER_URL")
                .context("RESPONSE_FORMATTER_URL must be set")?,
            text_retrieval_timeout_secs: env::var("TEXT_RETRIEVAL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("TEXT_RETRIEVAL_TIMEOUT_SECS must be a valid number")?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            raw_analysis_route: env::var("GATEWAY_RAW_ANALYSIS_ROUTE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_list_parsing() {
        let origins: Vec<String> = "chrome-extension://abc, http://localhost:3000 ,"
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        assert_eq!(
            origins,
            vec![
                "chrome-extension://abc".to_string(),
                "http://localhost:3000".to_string()
            ]
        );
    }
}
