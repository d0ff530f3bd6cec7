//! Endpoint, credential and HTTP settings for the concrete providers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the Tavily API key
pub const TAVILY_API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Shared HTTP settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Downloads larger than this are rejected (bytes)
    pub max_document_bytes: usize,
}

impl HttpConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("veracity/{}", env!("CARGO_PKG_VERSION")),
            max_document_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Tavily web search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TavilyConfig {
    /// API base URL
    pub endpoint: String,
    /// API key; falls back to `TAVILY_API_KEY`
    pub api_key: Option<String>,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.tavily.com".to_string(),
            api_key: None,
        }
    }
}

/// arXiv query API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArxivConfig {
    /// Query endpoint
    pub endpoint: String,
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://export.arxiv.org/api/query".to_string(),
        }
    }
}

/// Gemini function-calling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FunctionCallingMode {
    /// The model must call a tool on every turn
    #[default]
    Any,
    /// The model decides whether to call a tool
    Auto,
}

/// Gemini reasoning engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API base URL
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// API key; falls back to `GEMINI_API_KEY`
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability
    pub top_p: f32,
    /// Maximum tokens per reply
    pub max_output_tokens: u32,
    /// Whether tool calls are forced
    pub function_calling_mode: FunctionCallingMode,
    /// Attempts per request before giving up
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            temperature: 0.75,
            top_p: 0.95,
            max_output_tokens: 4196,
            function_calling_mode: FunctionCallingMode::Any,
            max_retries: 3,
        }
    }
}

/// All provider settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Shared HTTP settings
    pub http: HttpConfig,
    /// Web search
    pub tavily: TavilyConfig,
    /// Scholarly corpus
    pub arxiv: ArxivConfig,
    /// Reasoning engine
    pub gemini: GeminiConfig,
}

impl ProvidersConfig {
    /// Fill missing API keys from the environment
    pub fn with_env_credentials(mut self) -> Self {
        if self.tavily.api_key.is_none() {
            self.tavily.api_key = std::env::var(TAVILY_API_KEY_ENV).ok();
        }
        if self.gemini.api_key.is_none() {
            self.gemini.api_key = std::env::var(GEMINI_API_KEY_ENV).ok();
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.http.timeout_secs == 0 {
            return Err("http.timeout_secs must be greater than 0".to_string());
        }
        for (name, endpoint) in [
            ("tavily.endpoint", &self.tavily.endpoint),
            ("arxiv.endpoint", &self.arxiv.endpoint),
            ("gemini.endpoint", &self.gemini.endpoint),
        ] {
            url::Url::parse(endpoint).map_err(|e| format!("{} is not a valid URL: {}", name, e))?;
        }
        if self.gemini.model.trim().is_empty() {
            return Err("gemini.model must not be empty".to_string());
        }
        if self.gemini.max_retries == 0 {
            return Err("gemini.max_retries must be greater than 0".to_string());
        }
        Ok(())
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
