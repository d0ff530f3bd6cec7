//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during claim extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// A classification pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<regex::Error> for ExtractorError {
    fn from(e: regex::Error) -> Self {
        ExtractorError::Pattern(e.to_string())
    }
}
