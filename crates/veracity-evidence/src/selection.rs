//! Choosing which claims to fact-check

use veracity_domain::{Claim, ClaimCategory, ClaimSet};

/// Categories in fact-checking priority order; assumptions are never selected
const PRIORITY: [ClaimCategory; 3] = [
    ClaimCategory::Factual,
    ClaimCategory::Conclusion,
    ClaimCategory::Causal,
];

/// Pick up to `max` claims: factual first, then conclusions, then causal
///
/// Within a category, extraction order is kept.
pub fn select_for_checking(claims: &ClaimSet, max: usize) -> Vec<Claim> {
    PRIORITY
        .iter()
        .flat_map(|category| claims.get(*category).iter())
        .take(max)
        .cloned()
        .collect()
}
