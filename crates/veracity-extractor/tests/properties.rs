//! Property tests for extraction and connection invariants

use proptest::prelude::*;
use veracity_domain::{normalize_whitespace, ClaimCategory, MIN_SHARED_KEYWORDS};
use veracity_extractor::{ClaimExtractor, ConnectionAnalyzer, ExtractorConfig};

const FRAGMENTS: &[&str] = &[
    "we assume",
    "therefore",
    "this causes",
    "leads to",
    "research shows",
    "42% of",
    "3.5 million",
    "growth",
    "markets",
    "people",
    "because of",
    "the system",
    "in conclusion",
    "evidence suggests",
    "prices",
    "given that",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 2..8).prop_map(|parts| parts.join(" "))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 0..12).prop_map(|sentences| sentences.join(". "))
}

proptest! {
    #[test]
    fn sentence_lands_in_at_most_one_category(text in document()) {
        let extractor = ClaimExtractor::new(ExtractorConfig::default()).unwrap();
        let extracted = extractor.extract(&text).unwrap();

        let mut seen = std::collections::HashSet::new();
        for claim in extracted.claims.iter() {
            prop_assert!(seen.insert(normalize_whitespace(claim.text())));
        }
        prop_assert_eq!(extracted.total, extracted.claims.total());
    }

    #[test]
    fn classification_is_deterministic(text in sentence()) {
        let extractor = ClaimExtractor::new(ExtractorConfig::default()).unwrap();
        prop_assert_eq!(extractor.classify(&text), extractor.classify(&text));
    }

    #[test]
    fn connections_share_two_keywords_and_reference_input(text in document()) {
        let extractor = ClaimExtractor::new(ExtractorConfig::default()).unwrap();
        let extracted = extractor.extract(&text).unwrap();
        let connections = ConnectionAnalyzer::default().analyze(&extracted.claims);

        for connection in &connections {
            prop_assert!(connection.shared_keywords().len() >= MIN_SHARED_KEYWORDS);
            prop_assert!(extracted.claims.contains(connection.from()));
            prop_assert!(extracted.claims.contains(connection.to()));
            prop_assert_eq!(connection.to().category(), ClaimCategory::Conclusion);
        }
    }
}
