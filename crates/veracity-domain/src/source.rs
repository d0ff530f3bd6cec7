//! Source documents and their extracted text

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A candidate document returned by a structured corpus search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Document title
    pub title: String,
    /// Author names in listed order
    pub authors: Vec<String>,
    /// Corpus identifier, e.g. `2301.01234v2`
    pub source_id: Option<String>,
    /// Direct link to the full-text PDF
    pub pdf_url: Option<String>,
    /// Landing page URL
    pub url: Option<String>,
    /// Abstract or summary
    pub abstract_text: String,
}

/// Where to read a document from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Remote document
    Url(String),
    /// Local file
    Path(PathBuf),
    /// Bytes already in memory
    Bytes(Vec<u8>),
}

impl DocumentSource {
    /// Interpret user input as a URL if it has an http(s) scheme, otherwise as a path
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DocumentSource::Url(trimmed.to_string())
        } else {
            DocumentSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Url(url) => f.write_str(url),
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
            DocumentSource::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// Plain text extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentText {
    /// Extracted text, pages joined by newlines
    pub text: String,
    /// Number of pages in the document, including skipped ones
    pub page_count: usize,
    /// Character count of `text`
    pub char_count: usize,
}

impl DocumentText {
    /// Build from extracted text, computing the character count
    pub fn new(text: String, page_count: usize) -> Self {
        let char_count = text.chars().count();
        Self {
            text,
            page_count,
            char_count,
        }
    }
}

/// Visible text of a fetched web page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Final URL of the page
    pub url: String,
    /// Contents of `<title>`, if any
    pub title: Option<String>,
    /// Whitespace-joined visible text
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_source_parse() {
        assert_eq!(
            DocumentSource::parse(" https://arxiv.org/pdf/2301.00001 "),
            DocumentSource::Url("https://arxiv.org/pdf/2301.00001".to_string())
        );
        assert_eq!(
            DocumentSource::parse("papers/report.pdf"),
            DocumentSource::Path(PathBuf::from("papers/report.pdf"))
        );
        assert_eq!(DocumentSource::Bytes(vec![0; 3]).to_string(), "<3 bytes>");
    }

    #[test]
    fn test_document_text_counts_chars() {
        let text = DocumentText::new("naïve".to_string(), 1);
        assert_eq!(text.char_count, 5);
    }
}
