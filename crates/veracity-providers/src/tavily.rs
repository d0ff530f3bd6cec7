//! Tavily web search

use crate::config::{HttpConfig, TavilyConfig, TAVILY_API_KEY_ENV};
use crate::error::ProviderError;
use crate::http::{build_client, check_status, request_error};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use veracity_domain::traits::SearchProvider;
use veracity_domain::{ToolError, WebHit};

/// Web search through the Tavily API
pub struct TavilySearch {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

impl TavilySearch {
    /// Create a search provider
    pub fn new(config: &TavilyConfig, http: &HttpConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            client: build_client(http)?,
        })
    }

    /// Whether an API key is configured
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_response(body: &str) -> Result<Vec<WebHit>, ToolError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| ToolError::Parse(format!("Invalid search response: {}", e)))?;
    Ok(response
        .results
        .into_iter()
        .map(|r| WebHit {
            title: r.title,
            url: r.url,
            snippet: r.content,
        })
        .collect())
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>, ToolError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ToolError::Credential(format!("{} not set", TAVILY_API_KEY_ENV)))?;

        debug!("Web search: {}", query);
        let response = self
            .client
            .post(format!("{}/search", self.endpoint))
            .json(&SearchRequest {
                api_key,
                query,
                max_results,
            })
            .send()
            .await
            .map_err(request_error)?;
        let body = check_status(response)
            .await?
            .text()
            .await
            .map_err(request_error)?;

        let mut hits = parse_response(&body)?;
        hits.truncate(max_results);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "query": "brunost",
            "results": [
                {"title": "Brunost", "url": "https://en.wikipedia.org/wiki/Brunost", "content": "Brown cheese", "score": 0.9},
                {"title": "Cheese study", "url": "https://example.org/a"}
            ]
        }"#;
        let hits = parse_response(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].snippet, "Brown cheese");
        assert_eq!(hits[1].snippet, "");
    }

    #[test]
    fn test_parse_invalid_response() {
        assert!(matches!(parse_response("<html>"), Err(ToolError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_key_is_credential_error() {
        let provider = TavilySearch::new(&TavilyConfig::default(), &HttpConfig::default()).unwrap();
        assert!(!provider.has_credential());
        let result = provider.search("anything", 5).await;
        assert!(matches!(result, Err(ToolError::Credential(_))));
    }
}
