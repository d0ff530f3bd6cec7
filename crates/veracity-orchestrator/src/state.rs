//! Per-session conversation state

use serde::Serialize;
use std::collections::BTreeSet;
use veracity_domain::traits::{EngineMessage, EngineResponse, ToolInvocation, ToolResponse};

use crate::tools::ToolKind;

/// Canonical form of a URL for dedup: trimmed, fragment dropped
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    match url.split_once('#') {
        Some((head, _)) => head.to_string(),
        None => url.to_string(),
    }
}

/// One entry of the conversation history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Turn {
    /// User text
    User(String),
    /// Engine reply
    Model {
        /// Natural-language content
        text: Option<String>,
        /// Requested tool calls
        tool_calls: Vec<ToolInvocation>,
    },
    /// Results sent back for the previous reply's tool calls
    ToolResults(Vec<ToolResponse>),
}

impl Turn {
    /// Conversation role of this entry
    pub fn role(&self) -> &'static str {
        match self {
            Turn::User(_) => "user",
            Turn::Model { .. } => "model",
            Turn::ToolResults(_) => "tool",
        }
    }
}

impl From<&EngineMessage> for Turn {
    fn from(message: &EngineMessage) -> Self {
        match message {
            EngineMessage::User(text) => Turn::User(text.clone()),
            EngineMessage::ToolResults(results) => Turn::ToolResults(results.clone()),
        }
    }
}

impl From<&EngineResponse> for Turn {
    fn from(response: &EngineResponse) -> Self {
        Turn::Model {
            text: response.text.clone(),
            tool_calls: response.tool_calls.clone(),
        }
    }
}

/// Everything the loop knows about one session
///
/// Owned by a single loop and only mutated between turns.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    turn_history: Vec<Turn>,
    visited_urls: BTreeSet<String>,
    popular_coverage: BTreeSet<String>,
    primary_sources: Vec<String>,
    primary_source_found: bool,
    disabled_tools: BTreeSet<ToolKind>,
    tool_calls_executed: usize,
    terminated: bool,
}

impl ConversationState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a history entry
    pub fn push_turn(&mut self, turn: Turn) {
        self.turn_history.push(turn);
    }

    /// History so far
    pub fn turn_history(&self) -> &[Turn] {
        &self.turn_history
    }

    /// Number of engine replies so far
    pub fn model_turns(&self) -> usize {
        self.turn_history
            .iter()
            .filter(|t| matches!(t, Turn::Model { .. }))
            .count()
    }

    /// Mark `url` visited; false if it already was
    pub fn visit(&mut self, url: &str) -> bool {
        self.visited_urls.insert(normalize_url(url))
    }

    /// Whether `url` was visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_urls.contains(&normalize_url(url))
    }

    /// URLs visited so far
    pub fn visited_urls(&self) -> &BTreeSet<String> {
        &self.visited_urls
    }

    /// Record a source read in full; primary sources unlock the report
    pub fn record_source(&mut self, url: &str, primary: bool) {
        let url = normalize_url(url);
        if primary {
            self.primary_source_found = true;
            if !self.primary_sources.contains(&url) {
                self.primary_sources.push(url);
            }
        } else {
            self.popular_coverage.insert(url);
        }
    }

    /// Record a URL only seen in search results
    pub fn record_coverage(&mut self, url: &str) {
        self.popular_coverage.insert(normalize_url(url));
    }

    /// URLs seen that were not primary sources
    pub fn popular_coverage(&self) -> &BTreeSet<String> {
        &self.popular_coverage
    }

    /// Primary sources read, in discovery order
    pub fn primary_sources(&self) -> &[String] {
        &self.primary_sources
    }

    /// Whether any primary source was read
    pub fn primary_source_found(&self) -> bool {
        self.primary_source_found
    }

    /// Stop offering `kind` for the rest of the session
    pub fn disable(&mut self, kind: ToolKind) {
        self.disabled_tools.insert(kind);
    }

    /// Whether `kind` was disabled
    pub fn is_disabled(&self, kind: ToolKind) -> bool {
        self.disabled_tools.contains(&kind)
    }

    /// Count one executed tool call
    pub fn count_tool_call(&mut self) {
        self.tool_calls_executed += 1;
    }

    /// Tool calls that reached a collaborator
    pub fn tool_calls_executed(&self) -> usize {
        self.tool_calls_executed
    }

    /// Mark the session finished
    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    /// Whether the session is finished
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("  https://a.example/x#part "), "https://a.example/x");
        assert_eq!(normalize_url("https://a.example/x"), "https://a.example/x");
    }

    #[test]
    fn test_visit_dedups_normalized() {
        let mut state = ConversationState::new();
        assert!(state.visit("https://a.example/x"));
        assert!(!state.visit("https://a.example/x#intro"));
        assert!(state.is_visited(" https://a.example/x"));
        assert_eq!(state.visited_urls().len(), 1);
    }

    #[test]
    fn test_record_source() {
        let mut state = ConversationState::new();
        state.record_source("https://news.example.com/a", false);
        assert!(!state.primary_source_found());
        state.record_source("https://arxiv.org/abs/2301.00001", true);
        state.record_source("https://arxiv.org/abs/2301.00001#v2", true);
        assert!(state.primary_source_found());
        assert_eq!(state.primary_sources().len(), 1);
        assert!(state.popular_coverage().contains("https://news.example.com/a"));
    }

    #[test]
    fn test_history_roles() {
        let mut state = ConversationState::new();
        state.push_turn(Turn::from(&EngineMessage::User("claim".into())));
        state.push_turn(Turn::from(&EngineResponse::default()));
        state.push_turn(Turn::ToolResults(vec![]));
        let roles: Vec<&str> = state.turn_history().iter().map(|t| t.role()).collect();
        assert_eq!(roles, vec!["user", "model", "tool"]);
        assert_eq!(state.model_turns(), 1);
    }
}
