//! Veracity Domain Layer
//!
//! Core data model and collaborator interfaces for the verification pipeline.
//! Every other crate in the workspace depends on this one; it performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Claim**: A single extracted sentence, classified into one of four categories
//! - **ClaimSet**: Ordered, de-duplicated claims grouped by category
//! - **Connection**: A keyword-overlap link between a supporting and a concluding claim
//! - **EvidenceResult**: What the web and a scholarly corpus said about one claim
//! - **VeracityReport**: The finalized output of one analysis run
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Network, document and reasoning-engine implementations live in `veracity-providers`
//! - The error taxonomy shared by every external collaborator lives in [`error`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod connection;
pub mod error;
pub mod evidence;
pub mod report;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use claim::{normalize_whitespace, Claim, ClaimCategory, ClaimSet, Confidence};
pub use connection::{Connection, ConnectionKind, MIN_SHARED_KEYWORDS};
pub use error::ToolError;
pub use evidence::{CorpusHit, EvidenceResult, MatchType, WebHit};
pub use report::{CredibilityScore, VeracityReport};
pub use source::{CorpusDocument, DocumentSource, DocumentText, PageText};
