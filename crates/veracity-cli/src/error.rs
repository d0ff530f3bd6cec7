//! Error types for the CLI application.

use thiserror::Error;
use veracity_evidence::EvidenceError;
use veracity_extractor::ExtractorError;
use veracity_orchestrator::OrchestratorError;
use veracity_providers::ProviderError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider could not be built
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Claim extraction failed
    #[error("{0}")]
    Extraction(#[from] ExtractorError),

    /// Evidence gathering or document analysis failed
    #[error("{0}")]
    Evidence(#[from] EvidenceError),

    /// The verification session failed
    #[error("{0}")]
    Session(#[from] OrchestratorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Process exit code for this error
    ///
    /// A session that ran out of turns or results is not a crash; it exits
    /// with 2 so scripts can tell it apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Session(OrchestratorError::Exhausted(_)) => 2,
            _ => 1,
        }
    }
}
