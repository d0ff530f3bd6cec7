//! arXiv scholarly corpus search

use crate::config::{ArxivConfig, HttpConfig};
use crate::error::ProviderError;
use crate::http::{build_client, check_status, request_error};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use veracity_domain::traits::CorpusProvider;
use veracity_domain::{normalize_whitespace, CorpusDocument, ToolError};

/// Corpus search over the arXiv Atom query API
pub struct ArxivCorpus {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(rename = "author", default)]
    authors: Vec<AtomAuthor>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: String,
    #[serde(rename = "@title", default)]
    title: Option<String>,
    #[serde(rename = "@type", default)]
    link_type: Option<String>,
}

impl ArxivCorpus {
    /// Create a corpus provider
    pub fn new(config: &ArxivConfig, http: &HttpConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            endpoint: config.endpoint.clone(),
            client: build_client(http)?,
        })
    }
}

/// The arXiv id in an `arxiv.org/abs/<id>` URL
pub fn arxiv_id(url: &str) -> Option<String> {
    url.split_once("arxiv.org/abs/")
        .map(|(_, id)| id.trim_end_matches('/').to_string())
        .filter(|id| !id.is_empty())
}

fn into_document(entry: AtomEntry) -> CorpusDocument {
    let pdf_url = entry
        .links
        .iter()
        .find(|l| {
            l.title.as_deref() == Some("pdf") || l.link_type.as_deref() == Some("application/pdf")
        })
        .map(|l| l.href.clone());
    let id = entry.id.trim().to_string();

    CorpusDocument {
        title: normalize_whitespace(&entry.title),
        authors: entry
            .authors
            .into_iter()
            .map(|a| normalize_whitespace(&a.name))
            .collect(),
        source_id: arxiv_id(&id),
        pdf_url,
        url: (!id.is_empty()).then_some(id),
        abstract_text: normalize_whitespace(&entry.summary),
    }
}

fn parse_feed(xml: &str) -> Result<Vec<CorpusDocument>, ToolError> {
    let feed: AtomFeed = quick_xml::de::from_str(xml)
        .map_err(|e| ToolError::Parse(format!("Invalid Atom feed: {}", e)))?;
    Ok(feed.entries.into_iter().map(into_document).collect())
}

#[async_trait]
impl CorpusProvider for ArxivCorpus {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CorpusDocument>, ToolError> {
        debug!("Corpus search: {}", query);
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("search_query", format!("all:{}", query).as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await
            .map_err(request_error)?;
        let body = check_status(response)
            .await?
            .text()
            .await
            .map_err(request_error)?;
        parse_feed(&body)
    }
}
