//! Deterministic mock collaborators for testing
//!
//! None of these touch the network. Each records how often it was called so
//! tests can assert on dedup and short-circuit behavior.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use veracity_domain::traits::{
    CorpusProvider, DocumentExtractor, EngineMessage, EngineResponse, PageFetcher,
    ReasoningEngine, ReasoningSession, SearchProvider, ToolDeclaration, ToolInvocation,
};
use veracity_domain::{CorpusDocument, DocumentSource, DocumentText, PageText, ToolError, WebHit};

#[derive(Debug)]
struct SearchState<T> {
    default: Vec<T>,
    by_query: HashMap<String, Result<Vec<T>, ToolError>>,
    failure: Option<ToolError>,
    queries: Vec<String>,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            default: Vec::new(),
            by_query: HashMap::new(),
            failure: None,
            queries: Vec::new(),
        }
    }
}

impl<T: Clone> SearchState<T> {
    fn answer(&mut self, query: &str, max_results: usize) -> Result<Vec<T>, ToolError> {
        self.queries.push(query.to_string());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let mut results = match self.by_query.get(query) {
            Some(result) => result.clone()?,
            None => self.default.clone(),
        };
        results.truncate(max_results);
        Ok(results)
    }
}

/// Mock web search
///
/// # Examples
///
/// ```
/// use veracity_providers::mock::MockSearch;
/// use veracity_domain::WebHit;
///
/// let search = MockSearch::new();
/// search.add_results("brunost", vec![WebHit {
///     title: "Brunost".into(),
///     url: "https://example.com/brunost".into(),
///     snippet: "Brown cheese".into(),
/// }]);
/// assert_eq!(search.call_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    state: Arc<Mutex<SearchState<WebHit>>>,
}

impl MockSearch {
    /// Create a search that returns nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Hits returned for queries without a specific answer
    pub fn with_default_hits(self, hits: Vec<WebHit>) -> Self {
        self.state.lock().default = hits;
        self
    }

    /// Hits returned for one query
    pub fn add_results(&self, query: impl Into<String>, hits: Vec<WebHit>) {
        self.state.lock().by_query.insert(query.into(), Ok(hits));
    }

    /// Error returned for one query
    pub fn add_error(&self, query: impl Into<String>, error: ToolError) {
        self.state.lock().by_query.insert(query.into(), Err(error));
    }

    /// Make every call fail
    pub fn fail_all(&self, error: ToolError) {
        self.state.lock().failure = Some(error);
    }

    /// Number of searches performed
    pub fn call_count(&self) -> usize {
        self.state.lock().queries.len()
    }

    /// Queries received, in order
    pub fn queries(&self) -> Vec<String> {
        self.state.lock().queries.clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>, ToolError> {
        self.state.lock().answer(query, max_results)
    }
}

/// Mock scholarly corpus
#[derive(Debug, Clone, Default)]
pub struct MockCorpus {
    state: Arc<Mutex<SearchState<CorpusDocument>>>,
}

impl MockCorpus {
    /// Create a corpus that returns nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents returned for queries without a specific answer
    pub fn with_default_documents(self, documents: Vec<CorpusDocument>) -> Self {
        self.state.lock().default = documents;
        self
    }

    /// Documents returned for one query
    pub fn add_results(&self, query: impl Into<String>, documents: Vec<CorpusDocument>) {
        self.state.lock().by_query.insert(query.into(), Ok(documents));
    }

    /// Make every call fail
    pub fn fail_all(&self, error: ToolError) {
        self.state.lock().failure = Some(error);
    }

    /// Number of searches performed
    pub fn call_count(&self) -> usize {
        self.state.lock().queries.len()
    }
}

#[async_trait]
impl CorpusProvider for MockCorpus {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CorpusDocument>, ToolError> {
        self.state.lock().answer(query, max_results)
    }
}

#[derive(Debug)]
struct ByKeyState<T> {
    entries: HashMap<String, Result<T, ToolError>>,
    calls: Vec<String>,
    delay: Option<Duration>,
}

impl<T> Default for ByKeyState<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            calls: Vec::new(),
            delay: None,
        }
    }
}

impl<T: Clone> ByKeyState<T> {
    fn answer(&mut self, key: &str) -> Result<T, ToolError> {
        self.calls.push(key.to_string());
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| Err(ToolError::Network(format!("HTTP 404 Not Found: {}", key))))
    }

    fn count(&self, key: &str) -> usize {
        self.calls.iter().filter(|k| k.as_str() == key).count()
    }
}

/// Mock page fetcher; unknown URLs fail with a network error
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    state: Arc<Mutex<ByKeyState<PageText>>>,
}

impl MockFetcher {
    /// Create a fetcher with no pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` at `url`
    pub fn add_page(&self, url: impl Into<String>, title: Option<&str>, text: impl Into<String>) {
        let url = url.into();
        let page = PageText {
            url: url.clone(),
            title: title.map(str::to_string),
            text: text.into(),
        };
        self.state.lock().entries.insert(url, Ok(page));
    }

    /// Fail fetches of `url`
    pub fn add_error(&self, url: impl Into<String>, error: ToolError) {
        self.state.lock().entries.insert(url.into(), Err(error));
    }

    /// Delay every fetch
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().delay = Some(delay);
        self
    }

    /// Total fetches
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Fetches of one URL
    pub fn fetch_count(&self, url: &str) -> usize {
        self.state.lock().count(url)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<PageText, ToolError> {
        let delay = self.state.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.state.lock().answer(url)
    }
}

/// Mock document extractor keyed by the source's display form
#[derive(Debug, Clone, Default)]
pub struct MockDocuments {
    state: Arc<Mutex<ByKeyState<DocumentText>>>,
}

impl MockDocuments {
    /// Create an extractor with no documents
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for the source whose display form is `key` (a URL or path)
    pub fn add_document(&self, key: impl Into<String>, text: impl Into<String>) {
        let document = DocumentText::new(text.into(), 1);
        self.state.lock().entries.insert(key.into(), Ok(document));
    }

    /// Fail extraction of `key`
    pub fn add_error(&self, key: impl Into<String>, error: ToolError) {
        self.state.lock().entries.insert(key.into(), Err(error));
    }

    /// Delay every extraction
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().delay = Some(delay);
        self
    }

    /// Total extractions
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Extractions of one key
    pub fn extract_count(&self, key: &str) -> usize {
        self.state.lock().count(key)
    }
}

#[async_trait]
impl DocumentExtractor for MockDocuments {
    async fn extract(&self, source: &DocumentSource) -> Result<DocumentText, ToolError> {
        let delay = self.state.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.state.lock().answer(&source.to_string())
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<Result<EngineResponse, ToolError>>,
    messages: Vec<EngineMessage>,
    system_instruction: Option<String>,
    declared_tools: Vec<String>,
    open_error: Option<ToolError>,
}

/// Reasoning engine that plays back a fixed script of replies
///
/// Once the script runs out, every reply is empty (no text, no tool calls).
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedEngine {
    /// Create an engine with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reply requesting `calls`
    pub fn then_call(self, calls: Vec<ToolInvocation>) -> Self {
        self.state.lock().replies.push_back(Ok(EngineResponse {
            text: None,
            tool_calls: calls,
        }));
        self
    }

    /// Append a plain-text reply without tool calls
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.state.lock().replies.push_back(Ok(EngineResponse {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }));
        self
    }

    /// Append a failed reply
    pub fn then_error(self, error: ToolError) -> Self {
        self.state.lock().replies.push_back(Err(error));
        self
    }

    /// Make `open_session` fail
    pub fn fail_open(self, error: ToolError) -> Self {
        self.state.lock().open_error = Some(error);
        self
    }

    /// Messages received across all sessions, in order
    pub fn messages(&self) -> Vec<EngineMessage> {
        self.state.lock().messages.clone()
    }

    /// Number of messages received
    pub fn turns(&self) -> usize {
        self.state.lock().messages.len()
    }

    /// System instruction of the last opened session
    pub fn system_instruction(&self) -> Option<String> {
        self.state.lock().system_instruction.clone()
    }

    /// Tool names declared by the last opened session
    pub fn declared_tools(&self) -> Vec<String> {
        self.state.lock().declared_tools.clone()
    }
}

#[async_trait]
impl ReasoningEngine for ScriptedEngine {
    async fn open_session(
        &self,
        system_instruction: &str,
        tools: &[ToolDeclaration],
    ) -> Result<Box<dyn ReasoningSession>, ToolError> {
        let mut state = self.state.lock();
        if let Some(err) = &state.open_error {
            return Err(err.clone());
        }
        state.system_instruction = Some(system_instruction.to_string());
        state.declared_tools = tools.iter().map(|t| t.name.clone()).collect();
        Ok(Box::new(ScriptedSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedSession {
    state: Arc<Mutex<ScriptState>>,
}

#[async_trait]
impl ReasoningSession for ScriptedSession {
    async fn send(&mut self, message: EngineMessage) -> Result<EngineResponse, ToolError> {
        let mut state = self.state.lock();
        state.messages.push(message);
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Ok(EngineResponse::default()))
    }
}
