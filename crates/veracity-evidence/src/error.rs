//! Error types for evidence gathering and analysis

use thiserror::Error;
use veracity_domain::ToolError;
use veracity_extractor::ExtractorError;

/// Errors that can occur while gathering evidence or analyzing a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvidenceError {
    /// A provider is missing its API key
    #[error("Missing credential: {0}")]
    Credential(String),

    /// The corpus search itself failed
    #[error("Corpus search failed: {0}")]
    Corpus(ToolError),

    /// The document to analyze could not be read
    #[error("Document error: {0}")]
    Document(ToolError),

    /// Claim extraction failed
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractorError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EvidenceError {
    /// The collaborator error behind this failure, if any
    pub fn as_tool_error(&self) -> ToolError {
        match self {
            EvidenceError::Credential(msg) => ToolError::Credential(msg.clone()),
            EvidenceError::Corpus(e) | EvidenceError::Document(e) => e.clone(),
            EvidenceError::Extraction(e) => ToolError::Parse(e.to_string()),
            EvidenceError::Config(msg) => ToolError::Validation(msg.clone()),
        }
    }
}
