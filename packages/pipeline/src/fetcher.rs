//! HTTP-based text fetcher.
//!
//! Fetches a page with a single GET and reduces the body to visible text.

use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::TextFetcher;
use crate::types::ArticleText;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Text fetcher that retrieves pages via HTTP.
///
/// Suitable for server-rendered article pages; JavaScript-heavy sites will
/// yield whatever text is present in the initial document.
///
/// # Example
///
/// ```rust,ignore
/// use pipeline::{HttpTextFetcher, TextFetcher};
/// use url::Url;
///
/// let fetcher = HttpTextFetcher::new().with_user_agent("RhetoricGateway/1.0");
/// let text = fetcher.fetch_text(&Url::parse("https://example.com")?).await?;
/// ```
pub struct HttpTextFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpTextFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTextFetcher {
    /// Create a new fetcher with default settings.
    pub fn new() -> Self {
        Self::with_timeout_secs(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(secs))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "RhetoricGateway/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Reduce an HTML document to its visible text.
    ///
    /// Script and style blocks are removed before parsing; the remaining
    /// text nodes are joined with whitespace collapsed to single spaces, the
    /// same shape a browser's rendered text selection would give.
    fn visible_text(html: &str) -> String {
        let script_pattern = regex::Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
        let style_pattern = regex::Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
        let stripped = script_pattern.replace_all(html, " ");
        let stripped = style_pattern.replace_all(&stripped, " ");

        let document = Html::parse_document(&stripped);
        let joined: String = document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ");

        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[async_trait]
impl TextFetcher for HttpTextFetcher {
    async fn fetch_text(&self, url: &Url) -> ExtractResult<ArticleText> {
        debug!(url = %url, "article fetch starting");

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "article fetch failed");
                if e.is_timeout() {
                    ExtractError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    ExtractError::Fetch(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "article fetch returned non-success status");
            return Err(ExtractError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ExtractError::Timeout {
                    url: url.to_string(),
                }
            } else {
                ExtractError::Parse(e.to_string())
            }
        })?;

        let text = Self::visible_text(&body);

        // Sentence boundaries are only interesting for debugging; the full
        // joined text is what flows downstream.
        debug!(
            url = %url,
            text_length = text.len(),
            sentences = text.split('.').filter(|s| !s.trim().is_empty()).count(),
            "article text extracted"
        );

        Ok(text)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_strips_markup() {
        let html = r#"
            <html><body>
                <h1>Hello.</h1>
                <p>World.</p>
            </body></html>
        "#;

        assert_eq!(HttpTextFetcher::visible_text(html), "Hello. World.");
    }

    #[test]
    fn test_visible_text_drops_scripts_and_styles() {
        let html = r#"
            <html><head>
                <style>body { color: red; }</style>
                <script>console.log("hidden");</script>
            </head><body>
                <p>Visible text.</p>
                <SCRIPT src="x.js">var also = "hidden";</SCRIPT>
            </body></html>
        "#;

        let text = HttpTextFetcher::visible_text(html);
        assert_eq!(text, "Visible text.");
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_visible_text_decodes_entities() {
        let html = "<p>Salt &amp; pepper &lt;3</p>";
        assert_eq!(HttpTextFetcher::visible_text(html), "Salt & pepper <3");
    }

    #[test]
    fn test_visible_text_collapses_whitespace() {
        let html = "<div>  spaced\n\n   out\t text  </div>";
        assert_eq!(HttpTextFetcher::visible_text(html), "spaced out text");
    }

    #[test]
    fn test_visible_text_empty_page_is_empty_string() {
        assert_eq!(HttpTextFetcher::visible_text("<html><body></body></html>"), "");
    }

    #[test]
    fn test_visible_text_is_deterministic() {
        let html = "<article><h2>Title</h2><p>Body text here.</p></article>";
        let first = HttpTextFetcher::visible_text(html);
        let second = HttpTextFetcher::visible_text(html);
        assert_eq!(first, second);
    }
}
