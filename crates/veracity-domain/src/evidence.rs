//! Evidence gathered for a single claim

use crate::{Claim, Confidence};
use serde::{Deserialize, Serialize};

/// One general web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebHit {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Short content excerpt
    pub snippet: String,
}

/// How a corpus document relates to the claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// The claim occurs verbatim (case-insensitive) in the document
    Verbatim,
    /// More than 60% of the claim's key terms occur in the document
    HighRelevance,
    /// The document was examined but few key terms occur in it
    LowRelevance,
    /// The document text could not be retrieved
    Unexamined,
}

impl MatchType {
    /// Confidence tier implied by this match, if the document was examined
    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            MatchType::Verbatim => Some(Confidence::High),
            MatchType::HighRelevance => Some(Confidence::Medium),
            MatchType::LowRelevance => Some(Confidence::Low),
            MatchType::Unexamined => None,
        }
    }
}

/// One structured-corpus candidate and its analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusHit {
    /// Document title
    pub title: String,
    /// Landing or PDF URL
    pub url: Option<String>,
    /// Corpus identifier (e.g. an arXiv id)
    pub source_id: Option<String>,
    /// Document authors
    pub authors: Vec<String>,
    /// Abstract, truncated for display
    pub abstract_excerpt: String,
    /// Outcome of the comparison
    pub match_type: MatchType,
    /// Key terms found / key terms considered, when examined without a verbatim match
    pub matched_terms: Option<(usize, usize)>,
    /// Why the document text could not be examined
    pub text_error: Option<String>,
}

impl CorpusHit {
    /// Human-readable relevance note
    pub fn relevance(&self) -> String {
        match (self.match_type, self.matched_terms) {
            (MatchType::Verbatim, _) => "Statement found directly in document".to_string(),
            (MatchType::HighRelevance, Some((found, total))) => {
                format!("High relevance - {}/{} key terms found", found, total)
            }
            (MatchType::LowRelevance, Some((found, total))) => {
                format!("Low relevance - {}/{} key terms found", found, total)
            }
            (MatchType::HighRelevance, None) => "High relevance".to_string(),
            (MatchType::LowRelevance, None) => "Low relevance".to_string(),
            (MatchType::Unexamined, _) => "Potentially relevant based on title/abstract".to_string(),
        }
    }
}

/// Everything gathered for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceResult {
    /// The claim that was checked
    pub claim: Claim,
    /// General web search hits
    pub web_hits: Vec<WebHit>,
    /// Why web search produced nothing, if it failed
    pub web_error: Option<String>,
    /// Structured-corpus candidates
    pub corpus_hits: Vec<CorpusHit>,
    /// Best confidence across examined candidates
    pub confidence: Confidence,
    /// One-line assessment
    pub assessment: String,
    /// Identifiers of the documents backing `confidence`
    pub supporting_sources: Vec<String>,
    /// Whether any candidate contained the claim verbatim
    pub found_in_source: bool,
}

impl EvidenceResult {
    /// A result recording that evidence gathering failed for this claim
    pub fn failed(claim: Claim, reason: impl Into<String>) -> Self {
        Self {
            claim,
            web_hits: Vec::new(),
            web_error: Some(reason.into()),
            corpus_hits: Vec::new(),
            confidence: Confidence::Error,
            assessment: "Error during fact-checking".to_string(),
            supporting_sources: Vec::new(),
            found_in_source: false,
        }
    }

    /// Individual 1-10 score implied by this result
    pub fn individual_score(&self) -> u8 {
        match self.confidence {
            Confidence::High if self.found_in_source => 9,
            Confidence::High => 8,
            Confidence::Medium => 6,
            Confidence::Low => 4,
            Confidence::Error | Confidence::Unset => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClaimCategory;

    #[test]
    fn test_match_type_confidence() {
        assert_eq!(MatchType::Verbatim.confidence(), Some(Confidence::High));
        assert_eq!(MatchType::HighRelevance.confidence(), Some(Confidence::Medium));
        assert_eq!(MatchType::LowRelevance.confidence(), Some(Confidence::Low));
        assert_eq!(MatchType::Unexamined.confidence(), None);
    }

    #[test]
    fn test_failed_result() {
        let claim = Claim::new("Coffee causes insomnia in adults", ClaimCategory::Causal);
        let result = EvidenceResult::failed(claim, "connection reset");
        assert_eq!(result.confidence, Confidence::Error);
        assert_eq!(result.individual_score(), 1);
        assert_eq!(result.web_error.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_relevance_text() {
        let hit = CorpusHit {
            title: "Paper".into(),
            url: None,
            source_id: Some("2101.00001".into()),
            authors: vec![],
            abstract_excerpt: String::new(),
            match_type: MatchType::HighRelevance,
            matched_terms: Some((4, 5)),
            text_error: None,
        };
        assert_eq!(hit.relevance(), "High relevance - 4/5 key terms found");
    }
}
