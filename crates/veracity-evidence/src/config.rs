//! Configuration for evidence gathering

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the evidence gatherer and analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Corpus candidates examined by a standalone fact check
    pub search_depth: usize,

    /// Corpus candidates examined per claim by the analysis pipeline
    pub analyze_search_depth: usize,

    /// Web search hits requested per claim
    pub web_max_results: usize,

    /// Key-term fraction a document must exceed to count as high relevance
    pub relevance_threshold: f64,

    /// Words shorter than this are not key terms
    pub min_key_term_chars: usize,

    /// Minimum spacing between corpus document downloads (milliseconds)
    pub corpus_interval_ms: u64,

    /// Abstracts are truncated to this many characters
    pub abstract_excerpt_chars: usize,
}

impl EvidenceConfig {
    /// Spacing between corpus document downloads
    pub fn corpus_interval(&self) -> Duration {
        Duration::from_millis(self.corpus_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.search_depth == 0 || self.analyze_search_depth == 0 {
            return Err("search depths must be greater than 0".to_string());
        }
        if self.web_max_results == 0 {
            return Err("web_max_results must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(format!(
                "relevance_threshold must be in [0.0, 1.0], got {}",
                self.relevance_threshold
            ));
        }
        if self.min_key_term_chars == 0 {
            return Err("min_key_term_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            analyze_search_depth: 2,
            web_max_results: 5,
            relevance_threshold: 0.6,
            min_key_term_chars: 5,
            corpus_interval_ms: 500,
            abstract_excerpt_chars: 500,
        }
    }
}

impl EvidenceConfig {
    /// Quick preset: fewer candidates per claim
    pub fn quick() -> Self {
        Self {
            search_depth: 1,
            analyze_search_depth: 1,
            web_max_results: 3,
            ..Self::default()
        }
    }

    /// Thorough preset: more candidates, stricter relevance
    pub fn thorough() -> Self {
        Self {
            search_depth: 5,
            analyze_search_depth: 3,
            web_max_results: 10,
            relevance_threshold: 0.75,
            corpus_interval_ms: 1000,
            ..Self::default()
        }
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
