//! Session configuration

use serde::{Deserialize, Serialize};
use crate::tools::ToolKind;
use std::time::Duration;
use veracity_gatekeeper::ReportSchema;

/// Configuration for one verification session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Engine model override; the provider's default when unset
    pub model: Option<String>,

    /// Maximum number of engine replies per session
    pub max_turns: usize,

    /// Timeout for a single tool call (seconds)
    pub tool_timeout_secs: u64,

    /// Timeout for `fact_check` and `analyze_document` (seconds); these chain
    /// many requests that are each bounded by the provider timeouts
    pub composite_tool_timeout_secs: u64,

    /// Tool calls of one batch executed at the same time
    pub max_concurrent_tools: usize,

    /// Require the report through `emit_report`; when false, a tool-free
    /// engine reply is accepted as the report
    pub structured_report: bool,

    /// Hits requested per `search_web` call
    pub search_max_results: usize,

    /// Claims fact-checked per `analyze_document` call unless the engine asks otherwise
    pub analyze_max_claims: usize,

    /// Tool result text beyond this many characters is cut off
    pub max_tool_result_chars: usize,

    /// Required report layout
    pub report_schema: ReportSchema,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_turns: 12,
            tool_timeout_secs: 30,
            composite_tool_timeout_secs: 300,
            max_concurrent_tools: 4,
            structured_report: true,
            search_max_results: 5,
            analyze_max_claims: 5,
            max_tool_result_chars: 20_000,
            report_schema: ReportSchema::default(),
        }
    }
}

impl SessionConfig {
    /// Short sessions for a quick answer
    pub fn quick() -> Self {
        Self {
            max_turns: 6,
            tool_timeout_secs: 15,
            composite_tool_timeout_secs: 120,
            analyze_max_claims: 3,
            ..Default::default()
        }
    }

    /// Long sessions that follow citation chains further
    pub fn thorough() -> Self {
        Self {
            max_turns: 24,
            tool_timeout_secs: 60,
            composite_tool_timeout_secs: 600,
            search_max_results: 10,
            analyze_max_claims: 10,
            ..Default::default()
        }
    }

    /// Timeout for a single tool call
    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    /// Timeout for one call of `kind`
    pub fn timeout_for(&self, kind: ToolKind) -> Duration {
        if kind.is_composite() {
            Duration::from_secs(self.composite_tool_timeout_secs)
        } else {
            self.tool_timeout()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_turns == 0 {
            return Err("max_turns must be greater than 0".to_string());
        }
        if self.tool_timeout_secs == 0 {
            return Err("tool_timeout_secs must be greater than 0".to_string());
        }
        if self.composite_tool_timeout_secs < self.tool_timeout_secs {
            return Err(format!(
                "composite_tool_timeout_secs ({}) must not be less than tool_timeout_secs ({})",
                self.composite_tool_timeout_secs, self.tool_timeout_secs
            ));
        }
        if self.max_concurrent_tools == 0 {
            return Err("max_concurrent_tools must be greater than 0".to_string());
        }
        if self.search_max_results == 0 || self.analyze_max_claims == 0 {
            return Err("search_max_results and analyze_max_claims must be greater than 0".to_string());
        }
        if self.max_tool_result_chars < 100 {
            return Err(format!(
                "max_tool_result_chars must be at least 100, got {}",
                self.max_tool_result_chars
            ));
        }
        self.report_schema
            .validate()
            .map_err(|e| format!("report_schema: {}", e))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
