//! Veracity Evidence
//!
//! Evidence gathering, credibility scoring and the packaged analysis pipeline.
//!
//! # Overview
//!
//! For one claim the [`EvidenceGatherer`] runs a general web search and a
//! structured corpus search, then downloads each corpus candidate and compares
//! its text with the claim:
//!
//! - verbatim (case-insensitive) occurrence → High
//! - more than 60% of the claim's key terms present → Medium
//! - anything else → Low
//!
//! Candidate downloads are spaced by a [`FixedIntervalLimiter`] whose clock can
//! be replaced in tests.
//!
//! The [`CredibilityScorer`] folds the per-claim tiers into a 1-10 score, and
//! the [`Analyzer`] chains extraction, connection analysis, claim selection,
//! gathering and scoring into a finished [`veracity_domain::VeracityReport`].
//!
//! # Architecture
//!
//! ```text
//! text/document → extract → connect → select → gather (per claim) → score → report
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod gatherer;
mod limiter;
mod scorer;
mod selection;

pub use analyzer::Analyzer;
pub use config::EvidenceConfig;
pub use error::EvidenceError;
pub use gatherer::{key_terms, EvidenceGatherer};
pub use limiter::{Clock, FakeClock, FixedIntervalLimiter, TokioClock};
pub use scorer::CredibilityScorer;
pub use selection::select_for_checking;
