//! PDF text extraction

use crate::config::HttpConfig;
use crate::error::ProviderError;
use crate::http::{build_client, check_status, request_error};
use async_trait::async_trait;
use tracing::{debug, info, warn};
use veracity_domain::traits::DocumentExtractor;
use veracity_domain::{DocumentSource, DocumentText, ToolError};

/// Extracts text from PDFs given as URL, path or bytes
pub struct PdfExtractor {
    client: reqwest::Client,
    max_bytes: usize,
}

impl PdfExtractor {
    /// Create an extractor
    pub fn new(http: &HttpConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(http)?,
            max_bytes: http.max_document_bytes,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ToolError> {
        debug!("Downloading PDF: {}", url);
        let response = self.client.get(url).send().await.map_err(request_error)?;
        let bytes = check_status(response)
            .await?
            .bytes()
            .await
            .map_err(request_error)?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    async fn load(&self, source: &DocumentSource) -> Result<Vec<u8>, ToolError> {
        let bytes = match source {
            DocumentSource::Url(url) => self.download(url).await?,
            DocumentSource::Path(path) => tokio::fs::read(path).await.map_err(|e| {
                ToolError::Parse(format!("Failed to open PDF file {}: {}", path.display(), e))
            })?,
            DocumentSource::Bytes(bytes) => bytes.clone(),
        };
        if bytes.len() > self.max_bytes {
            return Err(ToolError::Parse(format!(
                "Document too large: {} bytes (max: {})",
                bytes.len(),
                self.max_bytes
            )));
        }
        Ok(bytes)
    }
}

/// Extract text page by page, skipping pages that fail
pub fn extract_pdf_text(bytes: &[u8]) -> Result<DocumentText, ToolError> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| ToolError::Parse(format!("Unreadable PDF: {}", e)))?;

    let pages = document.get_pages();
    let page_count = pages.len();
    let mut text = String::new();
    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) if !page_text.trim().is_empty() => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping page {}: {}", page_number, e),
        }
    }

    if text.trim().is_empty() {
        return Err(ToolError::Parse("No text could be extracted from PDF".to_string()));
    }
    let document = DocumentText::new(text, page_count);
    info!(
        "Extracted {} characters from {} pages",
        document.char_count, document.page_count
    );
    Ok(document)
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract(&self, source: &DocumentSource) -> Result<DocumentText, ToolError> {
        let bytes = self.load(source).await?;
        tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            .map_err(|e| ToolError::Parse(format!("PDF extraction task failed: {}", e)))?
    }
}
