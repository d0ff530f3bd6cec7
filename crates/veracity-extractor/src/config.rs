//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for claim extraction and connection analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sentences shorter than this (characters, after trimming) are discarded
    pub min_sentence_chars: usize,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Claims per category considered by the connection analyzer
    pub max_claims_per_category: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_sentence_chars == 0 {
            return Err("min_sentence_chars must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_claims_per_category == 0 {
            return Err("max_claims_per_category must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: 20,
            max_text_length: 2_000_000,
            max_claims_per_category: 200,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: longer sentences only, tighter connection cap
    pub fn strict() -> Self {
        Self {
            min_sentence_chars: 40,
            max_text_length: 500_000,
            max_claims_per_category: 50,
        }
    }

    /// Lenient preset: short sentences allowed, large documents accepted
    pub fn lenient() -> Self {
        Self {
            min_sentence_chars: 12,
            max_text_length: 10_000_000,
            max_claims_per_category: 500,
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
