//! Veracity Extractor
//!
//! Heuristic claim extraction and connection analysis.
//!
//! # Overview
//!
//! Text is normalized, split into sentences on terminal punctuation, and each
//! sentence long enough to carry a claim is classified by an ordered list of
//! regex pattern families. Classification is **first match wins**:
//!
//! ```text
//! assumption → conclusion → causal → factual → (catch-all magnitude → factual)
//! ```
//!
//! A sentence that matches several families lands only in the first. This
//! precedence is part of the contract; reordering the families changes results.
//!
//! The [`ConnectionAnalyzer`] then links assumptions and causal claims to the
//! conclusions they share at least two 4+ letter keywords with.
//!
//! # Example Usage
//!
//! ```
//! use veracity_extractor::{ClaimExtractor, ConnectionAnalyzer, ExtractorConfig};
//! use veracity_domain::ClaimCategory;
//!
//! let extractor = ClaimExtractor::new(ExtractorConfig::default()).unwrap();
//! let extracted = extractor
//!     .extract("Studies show 75% of users prefer X. Therefore, X is superior.")
//!     .unwrap();
//!
//! assert_eq!(extracted.total, 2);
//! assert_eq!(extracted.claims.get(ClaimCategory::Factual).len(), 1);
//!
//! let connections = ConnectionAnalyzer::new(ExtractorConfig::default()).analyze(&extracted.claims);
//! assert!(connections.is_empty());
//! ```

#![warn(missing_docs)]

mod config;
mod connections;
mod error;
mod extractor;
mod patterns;
mod segment;
mod types;


pub use config::ExtractorConfig;
pub use connections::{keywords, ConnectionAnalyzer};
pub use error::ExtractorError;
pub use extractor::ClaimExtractor;
pub use patterns::ClaimClassifier;
pub use segment::split_sentences;
pub use types::ExtractedClaims;
