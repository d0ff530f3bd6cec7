//! Core claim extractor

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::patterns::ClaimClassifier;
use crate::segment::split_sentences;
use crate::types::ExtractedClaims;
use tracing::{debug, info};
use veracity_domain::{ClaimCategory, ClaimSet};

/// Converts raw text into a classified [`ClaimSet`]
#[derive(Debug, Clone)]
pub struct ClaimExtractor {
    classifier: ClaimClassifier,
    config: ExtractorConfig,
}

impl ClaimExtractor {
    /// Create an extractor, validating the configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            classifier: ClaimClassifier::new()?,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Classify a single sentence without length filtering
    pub fn classify(&self, sentence: &str) -> Option<ClaimCategory> {
        self.classifier.classify(sentence)
    }

    /// Extract claims from text
    ///
    /// Empty input yields an empty set. Only over-long input is an error.
    pub fn extract(&self, text: &str) -> Result<ExtractedClaims, ExtractorError> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                length,
                self.config.max_text_length,
            ));
        }

        let sentences = split_sentences(text, self.config.min_sentence_chars);
        debug!("Analyzing {} sentences from {} chars", sentences.len(), length);

        let mut claims = ClaimSet::new();
        for sentence in &sentences {
            if let Some(category) = self.classifier.classify(sentence) {
                claims.insert(sentence, category);
            }
        }

        let total = claims.total();
        info!(
            "Extracted {} claims: {} assumptions, {} conclusions, {} factual, {} causal",
            total,
            claims.get(ClaimCategory::Assumption).len(),
            claims.get(ClaimCategory::Conclusion).len(),
            claims.get(ClaimCategory::Factual).len(),
            claims.get(ClaimCategory::Causal).len(),
        );

        Ok(ExtractedClaims {
            claims,
            total,
            sentences_considered: sentences.len(),
        })
    }
}
