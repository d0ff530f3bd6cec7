//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the verification pipeline and
//! infrastructure. Implementations live in `veracity-providers`.

use crate::{CorpusDocument, DocumentSource, DocumentText, PageText, ToolError, WebHit};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// General web search
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the web
    ///
    /// A missing API key must surface as [`ToolError::Credential`], never as
    /// an empty result.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>, ToolError>;
}

/// Structured (scholarly) corpus search
#[async_trait]
pub trait CorpusProvider: Send + Sync {
    /// Search the corpus, most relevant first
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CorpusDocument>, ToolError>;
}

/// Fetches a web page and strips it down to visible text
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page
    async fn fetch(&self, url: &str) -> Result<PageText, ToolError>;
}

/// Extracts plain text from a document
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract all readable pages, skipping pages that fail
    async fn extract(&self, source: &DocumentSource) -> Result<DocumentText, ToolError>;
}

/// A tool the reasoning engine may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    /// Wire name, e.g. `search_web`
    pub name: String,
    /// What the tool does, shown to the engine
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: serde_json::Value,
}

/// A tool call requested by the reasoning engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Requested tool name
    pub name: String,
    /// Arguments object
    pub args: serde_json::Value,
}

impl ToolInvocation {
    /// Create an invocation
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// The result of one tool call, sent back to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Name of the tool that was called
    pub name: String,
    /// Result text or error description
    pub content: String,
    /// Whether `content` describes a failure
    pub is_error: bool,
}

impl ToolResponse {
    /// Successful result
    pub fn ok(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Error-tagged result
    pub fn error(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

/// A message sent to the reasoning engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineMessage {
    /// Plain user text
    User(String),
    /// Results for every tool call of the previous response, in request order
    ToolResults(Vec<ToolResponse>),
}

/// One reply from the reasoning engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineResponse {
    /// Natural-language content, if any
    pub text: Option<String>,
    /// Requested tool calls, in order
    pub tool_calls: Vec<ToolInvocation>,
}

/// Opens conversations with a reasoning engine
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Start a session with a system instruction and a fixed tool set
    async fn open_session(
        &self,
        system_instruction: &str,
        tools: &[ToolDeclaration],
    ) -> Result<Box<dyn ReasoningSession>, ToolError>;
}

/// One ongoing conversation; the session keeps its own wire history
#[async_trait]
pub trait ReasoningSession: Send {
    /// Send a message and wait for the reply
    async fn send(&mut self, message: EngineMessage) -> Result<EngineResponse, ToolError>;
}
