//! Report module - the finalized result of one analysis run

use crate::{ClaimCategory, ClaimSet, Connection, EvidenceResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims longer than this are truncated in rendered reports
const MAX_RENDERED_CLAIM_CHARS: usize = 150;

/// Aggregate credibility of a set of evidence-checked claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredibilityScore {
    /// Score in [1, 10]
    pub score: u8,
    /// Tier wording for `score`
    pub assessment: String,
    /// Human-readable breakdown of the counts behind the score
    pub explanation: String,
    /// Number of evidence-checked claims
    pub checked: usize,
    /// High-confidence results
    pub high: usize,
    /// Medium-confidence results
    pub medium: usize,
    /// Low-confidence and failed results
    pub unverified: usize,
}

impl CredibilityScore {
    /// High plus medium results
    pub fn verified(&self) -> usize {
        self.high + self.medium
    }
}

/// Output of one analysis run
///
/// Built once by [`VeracityReport::finalize`]; there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeracityReport {
    source: String,
    claims: ClaimSet,
    connections: Vec<Connection>,
    evidence: Vec<EvidenceResult>,
    credibility: CredibilityScore,
}

impl VeracityReport {
    /// Assemble the final report
    pub fn finalize(
        source: impl Into<String>,
        claims: ClaimSet,
        connections: Vec<Connection>,
        evidence: Vec<EvidenceResult>,
        credibility: CredibilityScore,
    ) -> Self {
        Self {
            source: source.into(),
            claims,
            connections,
            evidence,
            credibility,
        }
    }

    /// What was analyzed (URL, path or a label)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every extracted claim, with evidence state on the checked ones
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Connections between claims
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Evidence for the checked claims, in checking order
    pub fn evidence(&self) -> &[EvidenceResult] {
        &self.evidence
    }

    /// Aggregate score
    pub fn credibility(&self) -> &CredibilityScore {
        &self.credibility
    }

    /// Credibility score in [1, 10]
    pub fn credibility_score(&self) -> u8 {
        self.credibility.score
    }

    /// Explanation of the credibility score
    pub fn explanation(&self) -> &str {
        &self.credibility.explanation
    }
}

fn truncate_claim(text: &str) -> String {
    if text.chars().count() > MAX_RENDERED_CLAIM_CHARS {
        let head: String = text.chars().take(MAX_RENDERED_CLAIM_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

impl fmt::Display for VeracityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.credibility;
        writeln!(f, "Veracity Analysis Report")?;
        writeln!(f, "========================")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f)?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "-------")?;
        writeln!(f, "Overall Credibility Score: {}/10", c.score)?;
        writeln!(f, "Assessment: {}", c.assessment)?;
        writeln!(f)?;
        writeln!(f, "CLAIMS ANALYSIS")?;
        writeln!(f, "---------------")?;
        writeln!(f, "Total claims extracted: {}", self.claims.total())?;
        for category in ClaimCategory::ALL {
            writeln!(f, "- {}s: {}", category.label(), self.claims.get(category).len())?;
        }
        writeln!(f)?;
        writeln!(f, "Claims fact-checked: {}", c.checked)?;
        writeln!(f, "- Verified: {}", c.verified())?;
        writeln!(f, "- Unverified: {}", c.unverified)?;
        writeln!(f)?;
        writeln!(f, "{}", c.explanation)?;
        writeln!(f)?;
        writeln!(f, "ALL CLAIMS WITH INDIVIDUAL SCORES")?;
        writeln!(f, "=================================")?;

        for category in ClaimCategory::ALL {
            let claims = self.claims.get(category);
            if claims.is_empty() {
                continue;
            }
            let heading = format!("{}S:", category.label().to_uppercase());
            writeln!(f)?;
            writeln!(f, "{}", heading)?;
            writeln!(f, "{}", "-".repeat(heading.len()))?;
            for (i, claim) in claims.iter().enumerate() {
                writeln!(f, "{}. {}", i + 1, truncate_claim(claim.text()))?;
                match claim.score() {
                    Some(score) if claim.checked() => writeln!(
                        f,
                        "   Score: {}/10 (Confidence: {})",
                        score,
                        claim.confidence()
                    )?,
                    _ => writeln!(f, "   Score: Not checked")?,
                }
            }
        }

        if !self.connections.is_empty() {
            writeln!(f)?;
            writeln!(f, "CONNECTIONS")?;
            writeln!(f, "===========")?;
            for connection in &self.connections {
                let keywords: Vec<&str> =
                    connection.shared_keywords().iter().map(|k| k.as_str()).collect();
                writeln!(
                    f,
                    "- [{}] \"{}\" -> \"{}\" (shared: {})",
                    connection.kind().strength(),
                    truncate_claim(connection.from().text()),
                    truncate_claim(connection.to().text()),
                    keywords.join(", ")
                )?;
            }
        }

        let scores: Vec<u8> = self.claims.checked().filter_map(|c| c.score()).collect();
        if !scores.is_empty() {
            let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
            let average = f64::from(sum) / scores.len() as f64;
            writeln!(f)?;
            writeln!(f, "SUMMARY STATISTICS")?;
            writeln!(f, "==================")?;
            writeln!(f, "Average score of checked claims: {:.1}/10", average)?;
            if let (Some(max), Some(min)) = (scores.iter().max(), scores.iter().min()) {
                writeln!(f, "Highest scoring claim: {}/10", max)?;
                writeln!(f, "Lowest scoring claim: {}/10", min)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Confidence;

    fn sample_report() -> VeracityReport {
        let mut claims = ClaimSet::new();
        claims.insert("Studies show 75% of users prefer X", ClaimCategory::Factual);
        claims.insert("Therefore, X is superior to Y", ClaimCategory::Conclusion);
        claims
            .find_mut(ClaimCategory::Factual, "Studies show 75% of users prefer X")
            .unwrap()
            .record_evidence(Confidence::Medium, 6);

        let credibility = CredibilityScore {
            score: 7,
            assessment: "Moderate credibility".to_string(),
            explanation: "Based on fact-checking 1 out of 2 claims".to_string(),
            checked: 1,
            high: 0,
            medium: 1,
            unverified: 0,
        };
        VeracityReport::finalize("paper.pdf", claims, vec![], vec![], credibility)
    }

    #[test]
    fn test_render_contains_sections() {
        let rendered = sample_report().to_string();
        assert!(rendered.contains("Overall Credibility Score: 7/10"));
        assert!(rendered.contains("- Factual Claims: 1"));
        assert!(rendered.contains("FACTUAL CLAIMS:"));
        assert!(rendered.contains("Score: 6/10 (Confidence: Medium)"));
        assert!(rendered.contains("Score: Not checked"));
        assert!(rendered.contains("Average score of checked claims: 6.0/10"));
    }

    #[test]
    fn test_truncate_long_claim() {
        let long = "a".repeat(200);
        let truncated = truncate_claim(&long);
        assert_eq!(truncated.chars().count(), MAX_RENDERED_CLAIM_CHARS);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_accessors() {
        let report = sample_report();
        assert_eq!(report.credibility_score(), 7);
        assert_eq!(report.source(), "paper.pdf");
        assert_eq!(report.credibility().verified(), 1);
    }
}
