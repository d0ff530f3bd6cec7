//! Wiring of concrete providers into the pipeline components.

use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;
use veracity_domain::traits::{CorpusProvider, DocumentExtractor, SearchProvider};
use veracity_evidence::{Analyzer, EvidenceGatherer};
use veracity_extractor::ClaimExtractor;
use veracity_orchestrator::{Orchestrator, SessionConfig, Toolbox};
use veracity_providers::{
    ArxivCorpus, FunctionCallingMode, GeminiEngine, HttpPageFetcher, PdfExtractor, TavilySearch,
};

struct Providers {
    search: Arc<dyn SearchProvider>,
    corpus: Arc<dyn CorpusProvider>,
    documents: Arc<dyn DocumentExtractor>,
}

fn providers(config: &Config) -> Result<Providers> {
    let p = &config.providers;
    Ok(Providers {
        search: Arc::new(TavilySearch::new(&p.tavily, &p.http)?),
        corpus: Arc::new(ArxivCorpus::new(&p.arxiv, &p.http)?),
        documents: Arc::new(PdfExtractor::new(&p.http)?),
    })
}

/// Evidence gatherer over the configured search and corpus providers
pub fn gatherer(config: &Config) -> Result<EvidenceGatherer> {
    let p = providers(config)?;
    Ok(EvidenceGatherer::new(
        p.search,
        p.corpus,
        p.documents,
        config.evidence.clone(),
    )?)
}

/// Full analysis pipeline
pub fn analyzer(config: &Config) -> Result<Analyzer> {
    let p = providers(config)?;
    let gatherer = EvidenceGatherer::new(
        p.search,
        p.corpus,
        Arc::clone(&p.documents),
        config.evidence.clone(),
    )?;
    let extractor = ClaimExtractor::new(config.extractor.clone())?;
    Ok(Analyzer::new(extractor, Arc::new(gatherer), p.documents))
}

/// Orchestrator over Gemini and every research tool
pub fn orchestrator(config: &Config, session: SessionConfig) -> Result<Orchestrator> {
    let p = &config.providers;
    let mut gemini = p.gemini.clone();
    if let Some(model) = &session.model {
        gemini.model = model.clone();
    }
    if !session.structured_report {
        gemini.function_calling_mode = FunctionCallingMode::Auto;
    }
    let engine = GeminiEngine::new(gemini, &p.http)?;

    let parts = providers(config)?;
    let tools = Toolbox::new(
        parts.search,
        parts.corpus,
        Arc::new(HttpPageFetcher::new(&p.http)?),
        parts.documents,
        config.evidence.clone(),
        config.extractor.clone(),
    )?;
    Ok(Orchestrator::new(Arc::new(engine), tools, session)?)
}
