//! Evidence gathering for a single claim

use crate::config::EvidenceConfig;
use crate::error::EvidenceError;
use crate::limiter::{Clock, FixedIntervalLimiter, TokioClock};
use std::sync::Arc;
use tracing::{debug, info, warn};
use veracity_domain::traits::{CorpusProvider, DocumentExtractor, SearchProvider};
use veracity_domain::{
    Claim, Confidence, CorpusDocument, CorpusHit, DocumentSource, EvidenceResult, MatchType,
    ToolError, WebHit,
};

/// Lower-cased whitespace-separated words of at least `min_chars` characters
pub fn key_terms(statement: &str, min_chars: usize) -> Vec<String> {
    statement
        .to_lowercase()
        .split_whitespace()
        .filter(|term| term.chars().count() >= min_chars)
        .map(str::to_string)
        .collect()
}

/// Queries web and corpus providers for one claim and derives a confidence tier
pub struct EvidenceGatherer {
    search: Arc<dyn SearchProvider>,
    corpus: Arc<dyn CorpusProvider>,
    documents: Arc<dyn DocumentExtractor>,
    limiter: FixedIntervalLimiter,
    config: EvidenceConfig,
}

impl EvidenceGatherer {
    /// Create a gatherer with a real-time download limiter
    pub fn new(
        search: Arc<dyn SearchProvider>,
        corpus: Arc<dyn CorpusProvider>,
        documents: Arc<dyn DocumentExtractor>,
        config: EvidenceConfig,
    ) -> Result<Self, EvidenceError> {
        Self::with_clock(search, corpus, documents, config, Arc::new(TokioClock::new()))
    }

    /// Create a gatherer whose download limiter runs on `clock`
    pub fn with_clock(
        search: Arc<dyn SearchProvider>,
        corpus: Arc<dyn CorpusProvider>,
        documents: Arc<dyn DocumentExtractor>,
        config: EvidenceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, EvidenceError> {
        config.validate().map_err(EvidenceError::Config)?;
        Ok(Self {
            search,
            corpus,
            documents,
            limiter: FixedIntervalLimiter::new(config.corpus_interval(), clock),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &EvidenceConfig {
        &self.config
    }

    /// Gather evidence for `claim`, examining up to `search_depth` corpus candidates
    ///
    /// Returns an error only for a missing credential or a failed corpus search.
    /// Web search failures and unreadable candidates are recorded on the result.
    pub async fn gather(
        &self,
        claim: Claim,
        search_depth: usize,
    ) -> Result<EvidenceResult, EvidenceError> {
        let statement = claim.text().to_string();
        info!("Fact-checking: {}", statement);

        let (web_hits, web_error) = match self
            .search
            .search(&statement, self.config.web_max_results)
            .await
        {
            Ok(hits) => (hits, None),
            Err(ToolError::Credential(msg)) => return Err(EvidenceError::Credential(msg)),
            Err(e) => {
                warn!("Web search failed: {}", e);
                (Vec::<WebHit>::new(), Some(format!("Web search failed: {}", e)))
            }
        };

        let candidates = match self.corpus.search(&statement, search_depth).await {
            Ok(docs) => docs,
            Err(ToolError::Credential(msg)) => return Err(EvidenceError::Credential(msg)),
            Err(e) => return Err(EvidenceError::Corpus(e)),
        };

        let mut corpus_hits = Vec::new();
        for candidate in candidates.into_iter().take(search_depth) {
            corpus_hits.push(self.examine(&statement, candidate).await);
        }

        let (confidence, assessment, supporting_sources) = summarize(&corpus_hits);
        let found_in_source = corpus_hits
            .iter()
            .any(|hit| hit.match_type == MatchType::Verbatim);
        debug!("Confidence {} ({})", confidence, assessment);

        Ok(EvidenceResult {
            claim,
            web_hits,
            web_error,
            corpus_hits,
            confidence,
            assessment,
            supporting_sources,
            found_in_source,
        })
    }

    async fn examine(&self, statement: &str, candidate: CorpusDocument) -> CorpusHit {
        let mut hit = CorpusHit {
            title: candidate.title,
            url: candidate.url.or_else(|| candidate.pdf_url.clone()),
            source_id: candidate.source_id,
            authors: candidate.authors,
            abstract_excerpt: excerpt(&candidate.abstract_text, self.config.abstract_excerpt_chars),
            match_type: MatchType::Unexamined,
            matched_terms: None,
            text_error: None,
        };

        let Some(pdf_url) = candidate.pdf_url else {
            return hit;
        };

        self.limiter.acquire().await;
        let document = match self.documents.extract(&DocumentSource::Url(pdf_url)).await {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not read candidate '{}': {}", hit.title, e);
                hit.text_error = Some(format!("Failed to download or parse document: {}", e));
                return hit;
            }
        };

        let haystack = document.text.to_lowercase();
        let needle = statement.to_lowercase();
        if haystack.contains(&needle) {
            hit.match_type = MatchType::Verbatim;
            return hit;
        }

        let terms = key_terms(statement, self.config.min_key_term_chars);
        let matches = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
        hit.matched_terms = Some((matches, terms.len()));
        hit.match_type = if matches as f64 > terms.len() as f64 * self.config.relevance_threshold {
            MatchType::HighRelevance
        } else {
            MatchType::LowRelevance
        };
        hit
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn source_label(hit: &CorpusHit) -> String {
    hit.source_id
        .clone()
        .or_else(|| hit.url.clone())
        .unwrap_or_else(|| hit.title.clone())
}

fn summarize(hits: &[CorpusHit]) -> (Confidence, String, Vec<String>) {
    let with = |kind: MatchType| -> Vec<String> {
        hits.iter()
            .filter(|h| h.match_type == kind)
            .map(source_label)
            .collect()
    };

    let verbatim = with(MatchType::Verbatim);
    if !verbatim.is_empty() {
        let assessment = format!("Statement found in {} corpus document(s)", verbatim.len());
        return (Confidence::High, assessment, verbatim);
    }
    let related = with(MatchType::HighRelevance);
    if !related.is_empty() {
        let assessment = format!("Related content found in {} corpus document(s)", related.len());
        return (Confidence::Medium, assessment, related);
    }
    (Confidence::Low, "Unable to verify".to_string(), Vec::new())
}
