//! Error taxonomy shared by every external collaborator

use thiserror::Error;

/// Failure of a search, fetch, extraction or reasoning-engine call
///
/// Network, parse and validation failures are recovered locally by the
/// orchestration loop (fed back to the engine as an error-tagged tool result).
/// A missing credential disables the affected capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Timeout or connection failure
    #[error("Network error: {0}")]
    Network(String),

    /// Unreadable page, document or response body
    #[error("Parse error: {0}")]
    Parse(String),

    /// Malformed request or schema violation
    #[error("Validation error: {0}")]
    Validation(String),

    /// API key or other credential is missing
    #[error("Missing credential: {0}")]
    Credential(String),
}

impl ToolError {
    /// Whether the session can keep going after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ToolError::Credential(_))
    }

    /// The message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            ToolError::Network(msg)
            | ToolError::Parse(msg)
            | ToolError::Validation(msg)
            | ToolError::Credential(msg) => msg,
        }
    }

    /// Short tag used when the error is rendered into a tool result
    pub fn tag(&self) -> &'static str {
        match self {
            ToolError::Network(_) => "NetworkError",
            ToolError::Parse(_) => "ParseError",
            ToolError::Validation(_) => "ValidationError",
            ToolError::Credential(_) => "CredentialError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability() {
        assert!(ToolError::Network("timeout".into()).is_recoverable());
        assert!(ToolError::Parse("bad pdf".into()).is_recoverable());
        assert!(ToolError::Validation("missing".into()).is_recoverable());
        assert!(!ToolError::Credential("TAVILY_API_KEY".into()).is_recoverable());
    }

    #[test]
    fn test_display_and_tag() {
        let err = ToolError::Credential("TAVILY_API_KEY not set".into());
        assert_eq!(err.to_string(), "Missing credential: TAVILY_API_KEY not set");
        assert_eq!(err.tag(), "CredentialError");
        assert_eq!(err.message(), "TAVILY_API_KEY not set");
    }
}
