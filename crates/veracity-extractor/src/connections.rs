//! Keyword-overlap connection analysis

use crate::config::ExtractorConfig;
use std::collections::BTreeSet;
use tracing::debug;
use veracity_domain::{Claim, ClaimCategory, ClaimSet, Connection, ConnectionKind};

/// Minimum keyword length in characters
const MIN_KEYWORD_CHARS: usize = 4;

/// Lower-cased words of at least four word characters
pub fn keywords(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}

/// Links assumptions and causal claims to the conclusions they share keywords with
#[derive(Debug, Clone)]
pub struct ConnectionAnalyzer {
    max_claims_per_category: usize,
}

impl ConnectionAnalyzer {
    /// Create an analyzer
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            max_claims_per_category: config.max_claims_per_category,
        }
    }

    /// Find all connections in `claims`
    ///
    /// Assumption-to-conclusion links come first (assumption-major), then
    /// causal-to-conclusion links in the same order.
    pub fn analyze(&self, claims: &ClaimSet) -> Vec<Connection> {
        let conclusions: Vec<(&Claim, BTreeSet<String>)> = self
            .capped(claims, ClaimCategory::Conclusion)
            .map(|c| (c, keywords(c.text())))
            .collect();

        let mut connections = Vec::new();
        for (category, kind) in [
            (ClaimCategory::Assumption, ConnectionKind::AssumptionSupport),
            (ClaimCategory::Causal, ConnectionKind::CausalChain),
        ] {
            for from in self.capped(claims, category) {
                let from_keywords = keywords(from.text());
                for (to, to_keywords) in &conclusions {
                    let shared: BTreeSet<String> =
                        from_keywords.intersection(to_keywords).cloned().collect();
                    if let Some(connection) =
                        Connection::new(kind, from.clone(), (*to).clone(), shared)
                    {
                        connections.push(connection);
                    }
                }
            }
        }

        debug!("Found {} connections between claims", connections.len());
        connections
    }

    fn capped<'a>(
        &self,
        claims: &'a ClaimSet,
        category: ClaimCategory,
    ) -> impl Iterator<Item = &'a Claim> {
        claims.get(category).iter().take(self.max_claims_per_category)
    }
}

impl Default for ConnectionAnalyzer {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let words = keywords("The CACHE improves read latency, and caching helps!");
        let expected: BTreeSet<String> = ["cache", "improves", "read", "latency", "caching", "helps"]
            .iter()
            .filter(|w| w.len() >= 4)
            .map(|w| w.to_string())
            .collect();
        assert_eq!(words, expected);
        assert!(!words.contains("the"));
        assert!(!words.contains("and"));
    }

    #[test]
    fn test_assumption_support_connection() {
        let mut claims = ClaimSet::new();
        claims.insert(
            "We assume remote workers report higher productivity",
            ClaimCategory::Assumption,
        );
        claims.insert(
            "Therefore remote workers deserve flexible schedules",
            ClaimCategory::Conclusion,
        );

        let connections = ConnectionAnalyzer::default().analyze(&claims);
        assert_eq!(connections.len(), 1);
        let connection = &connections[0];
        assert_eq!(connection.kind(), ConnectionKind::AssumptionSupport);
        let shared: Vec<&str> = connection.shared_keywords().iter().map(|s| s.as_str()).collect();
        assert_eq!(shared, vec!["remote", "workers"]);
    }

    #[test]
    fn test_single_shared_keyword_is_not_enough() {
        let mut claims = ClaimSet::new();
        claims.insert("Rising sea levels cause coastal flooding", ClaimCategory::Causal);
        claims.insert("Therefore coastal towns must relocate now", ClaimCategory::Conclusion);

        assert!(ConnectionAnalyzer::default().analyze(&claims).is_empty());
    }

    #[test]
    fn test_ordering_assumptions_before_causal() {
        let mut claims = ClaimSet::new();
        claims.insert("Suppose solar panels reduce energy bills", ClaimCategory::Assumption);
        claims.insert("Solar panels cause lower energy bills", ClaimCategory::Causal);
        claims.insert(
            "Therefore solar panels pay for themselves through energy bills",
            ClaimCategory::Conclusion,
        );

        let connections = ConnectionAnalyzer::default().analyze(&claims);
        let kinds: Vec<ConnectionKind> = connections.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![ConnectionKind::AssumptionSupport, ConnectionKind::CausalChain]
        );
    }

    #[test]
    fn test_cap_limits_considered_claims() {
        let mut claims = ClaimSet::new();
        claims.insert("Suppose green tea improves memory", ClaimCategory::Assumption);
        claims.insert("Suppose green tea improves memory daily", ClaimCategory::Assumption);
        claims.insert("Therefore green tea improves memory", ClaimCategory::Conclusion);

        let analyzer = ConnectionAnalyzer::new(ExtractorConfig {
            max_claims_per_category: 1,
            ..Default::default()
        });
        assert_eq!(analyzer.analyze(&claims).len(), 1);
        assert_eq!(ConnectionAnalyzer::default().analyze(&claims).len(), 2);
    }
}
