//! Error types for provider construction

use thiserror::Error;

/// Errors raised while building a provider
///
/// Failures of individual calls are reported as [`veracity_domain::ToolError`].
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Client(e.to_string())
    }
}
