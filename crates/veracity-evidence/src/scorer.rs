//! Credibility scoring

use veracity_domain::{Confidence, CredibilityScore, EvidenceResult};

const BASE_SCORE: f64 = 5.0;
const HIGH_WEIGHT: f64 = 4.0;
const MEDIUM_WEIGHT: f64 = 2.0;
const UNVERIFIED_PENALTY: f64 = 2.0;

/// Aggregates per-claim confidence into a 1-10 credibility score
#[derive(Debug, Clone, Copy, Default)]
pub struct CredibilityScorer;

impl CredibilityScorer {
    /// Create a scorer
    pub fn new() -> Self {
        Self
    }

    /// Score the evidence-checked subset of `total_claims` extracted claims
    ///
    /// With no results the score is a neutral 5 regardless of `total_claims`.
    pub fn score(&self, total_claims: usize, results: &[EvidenceResult]) -> CredibilityScore {
        if results.is_empty() {
            return CredibilityScore {
                score: 5,
                assessment: "Unable to verify - No claims were fact-checked".to_string(),
                explanation: "No fact-checking was performed; no claims could be verified"
                    .to_string(),
                checked: 0,
                high: 0,
                medium: 0,
                unverified: 0,
            };
        }

        let checked = results.len();
        let count = |wanted: fn(Confidence) -> bool| {
            results.iter().filter(|r| wanted(r.confidence)).count()
        };
        let high = count(|c| c == Confidence::High);
        let medium = count(|c| c == Confidence::Medium);
        let unverified = checked - high - medium;

        let n = checked as f64;
        let raw = BASE_SCORE + HIGH_WEIGHT * (high as f64 / n) + MEDIUM_WEIGHT * (medium as f64 / n)
            - UNVERIFIED_PENALTY * (unverified as f64 / n);
        let score = raw.round_ties_even().clamp(1.0, 10.0) as u8;

        let explanation = format!(
            "Based on fact-checking {} out of {} claims: {} highly verified, {} partially verified, {} unverified or low confidence",
            checked, total_claims, high, medium, unverified
        );

        CredibilityScore {
            score,
            assessment: Self::assessment_for(score).to_string(),
            explanation,
            checked,
            high,
            medium,
            unverified,
        }
    }

    /// Tier wording for a score
    pub fn assessment_for(score: u8) -> &'static str {
        match score {
            8.. => "High credibility - Most claims are well-supported by evidence",
            6..=7 => "Moderate credibility - Some claims are supported, others need verification",
            4..=5 => "Low credibility - Many claims lack supporting evidence",
            _ => "Very low credibility - Most claims cannot be verified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{Claim, ClaimCategory};

    fn result(confidence: Confidence) -> EvidenceResult {
        let claim = Claim::new("A claim that was checked somewhere", ClaimCategory::Factual);
        let mut result = EvidenceResult::failed(claim, "unused");
        result.confidence = confidence;
        result
    }

    #[test]
    fn test_no_results_is_neutral() {
        let scorer = CredibilityScorer::new();
        for total in [0, 1, 50] {
            let score = scorer.score(total, &[]);
            assert_eq!(score.score, 5);
            assert!(score.explanation.contains("no claims could be verified"));
        }
    }

    #[test]
    fn test_all_high() {
        let results = vec![result(Confidence::High), result(Confidence::High)];
        let score = CredibilityScorer::new().score(4, &results);
        assert_eq!(score.score, 9);
        assert!(score.assessment.starts_with("High credibility"));
        assert_eq!(
            score.explanation,
            "Based on fact-checking 2 out of 4 claims: 2 highly verified, 0 partially verified, 0 unverified or low confidence"
        );
    }

    #[test]
    fn test_all_unverified() {
        let results = vec![result(Confidence::Low), result(Confidence::Error)];
        let score = CredibilityScorer::new().score(2, &results);
        assert_eq!(score.score, 3);
        assert_eq!(score.unverified, 2);
        assert!(score.assessment.starts_with("Very low credibility"));
    }

    #[test]
    fn test_mixed() {
        // 5 + 4/4 + 2*2/4 - 2/4 = 6.5, ties to even
        let results = vec![
            result(Confidence::High),
            result(Confidence::Medium),
            result(Confidence::Medium),
            result(Confidence::Low),
        ];
        let score = CredibilityScorer::new().score(10, &results);
        assert_eq!(score.score, 6);
        assert_eq!(score.high, 1);
        assert_eq!(score.medium, 2);
        assert_eq!(score.unverified, 1);
        assert_eq!(score.verified(), 3);
    }

    #[test]
    fn test_assessment_tiers() {
        assert!(CredibilityScorer::assessment_for(10).starts_with("High"));
        assert!(CredibilityScorer::assessment_for(6).starts_with("Moderate"));
        assert!(CredibilityScorer::assessment_for(4).starts_with("Low"));
        assert!(CredibilityScorer::assessment_for(1).starts_with("Very low"));
    }
}
