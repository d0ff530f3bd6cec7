//! Veracity Gatekeeper
//!
//! Decides whether a final report may be accepted.
//!
//! The Gatekeeper provides:
//! - Section schema enforcement (exact heading set, no duplicates, no empty sections)
//! - Primary-source gating (no report before an authoritative source was read)
//! - Source list checks (no generic placeholders, no popular coverage cited as a source)
//! - Pluggable primary-source policies
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use veracity_gatekeeper::{ReportContext, ReportSchema, ReportSection, ReportValidator};
//!
//! let validator = ReportValidator::with_default_policy(ReportSchema::default()).unwrap();
//! let sections = vec![
//!     ReportSection::new("Claim", "Wind turbines kill more birds than cats do"),
//!     ReportSection::new("Judgement", "False"),
//!     ReportSection::new("Summary", "Cats kill far more birds."),
//!     ReportSection::new("Sources", "- Loss 2013 https://doi.org/10.1038/ncomms2380"),
//! ];
//! let popular = BTreeSet::new();
//! let context = ReportContext::new(true, &popular);
//!
//! assert!(validator.validate(&sections, &context).is_accepted());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod policy;
mod report;
mod validator;

pub use config::ReportSchema;
pub use error::GatekeeperError;
pub use policy::{extract_urls, AnyOf, CorpusIdentifier, DomainAllowList, PrimarySourcePolicy};
pub use report::{parse_markdown_report, source_entries, FinalReport, ReportSection};
pub use validator::{
    RejectionReason, ReportContext, ReportValidator, ValidationResult, ValidationStatus,
};
