//! HTML page fetching

use crate::config::HttpConfig;
use crate::error::ProviderError;
use crate::http::{build_client, check_status, request_error};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;
use veracity_domain::traits::PageFetcher;
use veracity_domain::{normalize_whitespace, PageText, ToolError};

/// Elements whose text is never visible
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Fetches pages over HTTP and reduces them to visible text
pub struct HttpPageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpPageFetcher {
    /// Create a fetcher
    pub fn new(http: &HttpConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(http)?,
            max_bytes: http.max_document_bytes,
        })
    }
}

/// Title and whitespace-joined visible text of an HTML document
pub fn visible_text(html: &str) -> (Option<String>, String) {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        })
        .filter(|t| !t.is_empty());

    let mut parts = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    (title, normalize_whitespace(&parts.join(" ")))
}

fn is_textual(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("html") || content_type.starts_with("text/")
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<PageText, ToolError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ToolError::Validation(format!("Invalid URL '{}': {}", url, e)))?;
        debug!("Fetching page: {}", parsed);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response).await?;

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(ToolError::Parse(format!(
                    "Not an HTML page ({}); use read_pdf for documents",
                    content_type
                )));
            }
        }

        let final_url = response.url().to_string();
        let bytes = response.bytes().await.map_err(request_error)?;
        if bytes.len() > self.max_bytes {
            return Err(ToolError::Parse(format!(
                "Page too large: {} bytes (max: {})",
                bytes.len(),
                self.max_bytes
            )));
        }

        let html = String::from_utf8_lossy(&bytes);
        let (title, text) = visible_text(&html);
        if text.is_empty() {
            return Err(ToolError::Parse(format!("No visible text on {}", final_url)));
        }
        Ok(PageText {
            url: final_url,
            title,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_strips_hidden_elements() {
        let html = r#"<html>
            <head>
                <title> Brown  Cheese </title>
                <style>body { color: red; }</style>
                <script>var tracking = true;</script>
            </head>
            <body>
                <h1>Brunost</h1>
                <p>Brunost is a <b>Norwegian</b> cheese.</p>
                <noscript>Enable JavaScript</noscript>
            </body>
        </html>"#;
        let (title, text) = visible_text(html);
        assert_eq!(title.as_deref(), Some("Brown Cheese"));
        assert!(text.contains("Brunost is a Norwegian cheese."));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color"));
        assert!(!text.contains("Enable JavaScript"));
    }

    #[test]
    fn test_visible_text_without_title() {
        let (title, text) = visible_text("<p>Just a paragraph</p>");
        assert!(title.is_none());
        assert_eq!(text, "Just a paragraph");
    }

    #[test]
    fn test_is_textual() {
        assert!(is_textual("text/html; charset=utf-8"));
        assert!(is_textual("application/xhtml+xml"));
        assert!(is_textual("text/plain"));
        assert!(!is_textual("application/pdf"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_validation_error() {
        let fetcher = HttpPageFetcher::new(&HttpConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(ToolError::Validation(_))));
    }
}
