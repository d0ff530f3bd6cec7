//! Types for extraction results

use serde::{Deserialize, Serialize};
use veracity_domain::ClaimSet;

/// Result of extracting claims from a text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedClaims {
    /// Classified, de-duplicated claims
    pub claims: ClaimSet,
    /// Total claims across all categories
    pub total: usize,
    /// Sentences that passed the length filter
    pub sentences_considered: usize,
}
