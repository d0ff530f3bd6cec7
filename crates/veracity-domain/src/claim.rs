//! Claim module - the unit of verification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to an extracted sentence
///
/// Categories are assigned by first-match precedence
/// (assumption, conclusion, causal, factual); see `veracity-extractor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimCategory {
    /// A premise the text takes for granted
    Assumption,

    /// A conclusion drawn by the text
    Conclusion,

    /// A checkable factual or quantitative statement
    Factual,

    /// A statement of cause and effect
    Causal,
}

impl ClaimCategory {
    /// All categories in report order
    pub const ALL: [ClaimCategory; 4] = [
        ClaimCategory::Assumption,
        ClaimCategory::Conclusion,
        ClaimCategory::Factual,
        ClaimCategory::Causal,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Assumption => "assumption",
            ClaimCategory::Conclusion => "conclusion",
            ClaimCategory::Factual => "factual",
            ClaimCategory::Causal => "causal",
        }
    }

    /// Human-readable label used in rendered reports
    pub fn label(&self) -> &'static str {
        match self {
            ClaimCategory::Assumption => "Assumption",
            ClaimCategory::Conclusion => "Conclusion",
            ClaimCategory::Factual => "Factual Claim",
            ClaimCategory::Causal => "Causal Claim",
        }
    }

    /// Parse a category from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "assumption" => Some(ClaimCategory::Assumption),
            "conclusion" => Some(ClaimCategory::Conclusion),
            "factual" | "factual claim" => Some(ClaimCategory::Factual),
            "causal" | "causal claim" => Some(ClaimCategory::Causal),
            _ => None,
        }
    }
}

impl std::str::FromStr for ClaimCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim category: {}", s))
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Confidence tier describing how strongly evidence corroborates a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Confidence {
    /// The claim was found verbatim in a source
    High,
    /// Most of the claim's key terms appear in a source
    Medium,
    /// Little or no corroborating evidence
    Low,
    /// Evidence gathering failed for this claim
    Error,
    /// Not yet evidence-checked
    #[default]
    Unset,
}

impl Confidence {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
            Confidence::Error => "Error",
            Confidence::Unset => "N/A",
        }
    }

    /// Ordering used when picking the best tier across candidates
    pub fn rank(&self) -> u8 {
        match self {
            Confidence::High => 3,
            Confidence::Medium => 2,
            Confidence::Low => 1,
            Confidence::Error | Confidence::Unset => 0,
        }
    }

    /// Low-confidence and failed results both count as unverified
    pub fn is_unverified(&self) -> bool {
        matches!(self, Confidence::Low | Confidence::Error)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A single extracted sentence
///
/// The text and category are fixed at construction. The evidence fields
/// (`checked`, `score`, `confidence`) are written once, by [`Claim::record_evidence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    text: String,
    category: ClaimCategory,
    checked: bool,
    score: Option<u8>,
    confidence: Confidence,
}

impl Claim {
    /// Create a new, unchecked claim. The text is whitespace-normalized.
    pub fn new(text: impl AsRef<str>, category: ClaimCategory) -> Self {
        Self {
            text: normalize_whitespace(text.as_ref()),
            category,
            checked: false,
            score: None,
            confidence: Confidence::Unset,
        }
    }

    /// The claim sentence
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The claim category
    pub fn category(&self) -> ClaimCategory {
        self.category
    }

    /// Whether evidence has been recorded for this claim
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Individual score in [1, 10], if checked
    pub fn score(&self) -> Option<u8> {
        self.score
    }

    /// Confidence tier, `Unset` until checked
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Record the outcome of evidence gathering
    ///
    /// Returns `false` and leaves the claim untouched if evidence was already recorded.
    pub fn record_evidence(&mut self, confidence: Confidence, score: u8) -> bool {
        if self.checked {
            return false;
        }
        self.checked = true;
        self.confidence = confidence;
        self.score = Some(score.clamp(1, 10));
        true
    }

    /// Same text and category, ignoring evidence state
    pub fn same_statement(&self, other: &Claim) -> bool {
        self.category == other.category && self.text == other.text
    }
}

/// Claims grouped by category
///
/// Within a category, entries keep first-seen order and no two entries are
/// equal after whitespace normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    assumptions: Vec<Claim>,
    conclusions: Vec<Claim>,
    factual: Vec<Claim>,
    causal: Vec<Claim>,
}

impl ClaimSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, category: ClaimCategory) -> &Vec<Claim> {
        match category {
            ClaimCategory::Assumption => &self.assumptions,
            ClaimCategory::Conclusion => &self.conclusions,
            ClaimCategory::Factual => &self.factual,
            ClaimCategory::Causal => &self.causal,
        }
    }

    fn bucket_mut(&mut self, category: ClaimCategory) -> &mut Vec<Claim> {
        match category {
            ClaimCategory::Assumption => &mut self.assumptions,
            ClaimCategory::Conclusion => &mut self.conclusions,
            ClaimCategory::Factual => &mut self.factual,
            ClaimCategory::Causal => &mut self.causal,
        }
    }

    /// Insert a sentence under a category
    ///
    /// Returns `false` if an equal (whitespace-normalized) sentence is already
    /// present in that category.
    pub fn insert(&mut self, text: impl AsRef<str>, category: ClaimCategory) -> bool {
        let claim = Claim::new(text, category);
        if claim.text.is_empty() {
            return false;
        }
        let bucket = self.bucket_mut(category);
        if bucket.iter().any(|existing| existing.text == claim.text) {
            return false;
        }
        bucket.push(claim);
        true
    }

    /// Claims of one category, in insertion order
    pub fn get(&self, category: ClaimCategory) -> &[Claim] {
        self.bucket(category)
    }

    /// Mutable lookup of a claim by category and text
    pub fn find_mut(&mut self, category: ClaimCategory, text: &str) -> Option<&mut Claim> {
        let text = normalize_whitespace(text);
        self.bucket_mut(category).iter_mut().find(|c| c.text == text)
    }

    /// Whether a claim with the same text and category is present
    pub fn contains(&self, claim: &Claim) -> bool {
        self.bucket(claim.category)
            .iter()
            .any(|existing| existing.text == claim.text)
    }

    /// Total number of claims across all categories
    pub fn total(&self) -> usize {
        ClaimCategory::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    /// Whether the set has no claims
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate all claims in report order (category-major)
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        ClaimCategory::ALL
            .into_iter()
            .flat_map(move |category| self.bucket(category).iter())
    }

    /// Claims that have evidence recorded
    pub fn checked(&self) -> impl Iterator<Item = &Claim> {
        self.iter().filter(|c| c.checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(ClaimCategory::parse("Factual Claim"), Some(ClaimCategory::Factual));
        assert_eq!(ClaimCategory::parse("causal"), Some(ClaimCategory::Causal));
        assert_eq!(ClaimCategory::parse("opinion"), None);
        assert!("conclusion".parse::<ClaimCategory>().is_ok());
    }

    #[test]
    fn test_confidence_rank() {
        assert!(Confidence::High.rank() > Confidence::Medium.rank());
        assert!(Confidence::Medium.rank() > Confidence::Low.rank());
        assert!(Confidence::Low.rank() > Confidence::Error.rank());
        assert!(Confidence::Error.is_unverified());
        assert!(!Confidence::Medium.is_unverified());
    }

    #[test]
    fn test_claim_text_is_normalized() {
        let claim = Claim::new("  Studies   show\n75% of users  ", ClaimCategory::Factual);
        assert_eq!(claim.text(), "Studies show 75% of users");
    }

    #[test]
    fn test_record_evidence_only_once() {
        let mut claim = Claim::new("Some claim about things", ClaimCategory::Factual);
        assert!(claim.record_evidence(Confidence::Medium, 6));
        assert!(!claim.record_evidence(Confidence::High, 9));
        assert_eq!(claim.confidence(), Confidence::Medium);
        assert_eq!(claim.score(), Some(6));
        assert!(claim.checked());
    }

    #[test]
    fn test_record_evidence_clamps_score() {
        let mut claim = Claim::new("Some claim about things", ClaimCategory::Causal);
        claim.record_evidence(Confidence::Error, 0);
        assert_eq!(claim.score(), Some(1));
    }

    #[test]
    fn test_claim_set_dedup_after_normalization() {
        let mut set = ClaimSet::new();
        assert!(set.insert("Therefore X is superior", ClaimCategory::Conclusion));
        assert!(!set.insert("Therefore  X is\tsuperior", ClaimCategory::Conclusion));
        assert!(set.insert("Therefore Y is superior", ClaimCategory::Conclusion));
        assert_eq!(set.get(ClaimCategory::Conclusion).len(), 2);
        assert_eq!(set.total(), 2);
    }

    #[test]
    fn test_claim_set_preserves_order() {
        let mut set = ClaimSet::new();
        set.insert("second sentence comes first", ClaimCategory::Factual);
        set.insert("first sentence comes second", ClaimCategory::Factual);
        set.insert("an assumption sentence here", ClaimCategory::Assumption);

        let texts: Vec<&str> = set.iter().map(|c| c.text()).collect();
        assert_eq!(
            texts,
            vec![
                "an assumption sentence here",
                "second sentence comes first",
                "first sentence comes second",
            ]
        );
    }

    #[test]
    fn test_claim_set_find_mut() {
        let mut set = ClaimSet::new();
        set.insert("The rate fell by 40 percent", ClaimCategory::Factual);
        let claim = set
            .find_mut(ClaimCategory::Factual, "The rate  fell by 40 percent")
            .unwrap();
        claim.record_evidence(Confidence::Low, 4);
        assert_eq!(set.checked().count(), 1);
        assert!(set.find_mut(ClaimCategory::Causal, "The rate fell by 40 percent").is_none());
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let mut set = ClaimSet::new();
        assert!(!set.insert("   ", ClaimCategory::Factual));
        assert!(set.is_empty());
    }
}
