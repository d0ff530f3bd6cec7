//! Packaged analysis pipeline producing a [`VeracityReport`]

use crate::error::EvidenceError;
use crate::gatherer::EvidenceGatherer;
use crate::scorer::CredibilityScorer;
use crate::selection::select_for_checking;
use std::sync::Arc;
use tracing::{info, warn};
use veracity_domain::traits::DocumentExtractor;
use veracity_domain::{DocumentSource, EvidenceResult, VeracityReport};
use veracity_extractor::{ClaimExtractor, ConnectionAnalyzer};

/// Runs extract → connect → select → gather → score over a text or document
pub struct Analyzer {
    extractor: ClaimExtractor,
    connections: ConnectionAnalyzer,
    gatherer: Arc<EvidenceGatherer>,
    documents: Arc<dyn DocumentExtractor>,
    scorer: CredibilityScorer,
}

impl Analyzer {
    /// Create an analyzer
    pub fn new(
        extractor: ClaimExtractor,
        gatherer: Arc<EvidenceGatherer>,
        documents: Arc<dyn DocumentExtractor>,
    ) -> Self {
        let connections = ConnectionAnalyzer::new(extractor.config().clone());
        Self {
            extractor,
            connections,
            gatherer,
            documents,
            scorer: CredibilityScorer::new(),
        }
    }

    /// The claim extractor used by this analyzer
    pub fn extractor(&self) -> &ClaimExtractor {
        &self.extractor
    }

    /// Read a document and analyze its text
    pub async fn analyze_document(
        &self,
        source: &DocumentSource,
        max_claims: usize,
    ) -> Result<VeracityReport, EvidenceError> {
        info!("Starting analysis of: {}", source);
        let document = self
            .documents
            .extract(source)
            .await
            .map_err(EvidenceError::Document)?;
        info!(
            "Extracted {} characters from {} pages",
            document.char_count, document.page_count
        );
        self.analyze_text(source.to_string(), &document.text, max_claims)
            .await
    }

    /// Analyze `text`, fact-checking at most `max_claims` claims
    ///
    /// A claim whose gathering fails is recorded with `Confidence::Error`.
    /// A missing credential aborts the whole analysis.
    pub async fn analyze_text(
        &self,
        source_label: impl Into<String>,
        text: &str,
        max_claims: usize,
    ) -> Result<VeracityReport, EvidenceError> {
        let extracted = self.extractor.extract(text)?;
        let connections = self.connections.analyze(&extracted.claims);
        let selected = select_for_checking(&extracted.claims, max_claims);
        let depth = self.gatherer.config().analyze_search_depth;

        let mut claims = extracted.claims;
        let planned = selected.len();
        let mut evidence: Vec<EvidenceResult> = Vec::with_capacity(planned);
        for (i, claim) in selected.into_iter().enumerate() {
            info!("Fact-checking claim {}/{}", i + 1, planned);
            let mut result = match self.gatherer.gather(claim.clone(), depth).await {
                Ok(result) => result,
                Err(EvidenceError::Credential(msg)) => return Err(EvidenceError::Credential(msg)),
                Err(e) => {
                    warn!("Fact-check failed for claim: {}", e);
                    EvidenceResult::failed(claim, e.to_string())
                }
            };
            let score = result.individual_score();
            result.claim.record_evidence(result.confidence, score);
            if let Some(stored) = claims.find_mut(result.claim.category(), result.claim.text()) {
                stored.record_evidence(result.confidence, score);
            }
            evidence.push(result);
        }

        let credibility = self.scorer.score(claims.total(), &evidence);
        info!(
            "Analysis complete: score {}/10 ({} of {} claims checked)",
            credibility.score,
            credibility.checked,
            claims.total()
        );

        Ok(VeracityReport::finalize(
            source_label,
            claims,
            connections,
            evidence,
            credibility,
        ))
    }
}
