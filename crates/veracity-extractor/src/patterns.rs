//! Ordered pattern families used to classify sentences

use crate::error::ExtractorError;
use regex::{Regex, RegexSet};
use veracity_domain::ClaimCategory;

const ASSUMPTION_PATTERNS: &[&str] = &[
    r"assum\w+",
    r"suppos\w+",
    r"hypothes\w+",
    r"presuppos\w+",
    r"premise",
    r"given that",
    r"based on the assumption",
];

const CONCLUSION_PATTERNS: &[&str] = &[
    r"therefore",
    r"thus",
    r"hence",
    r"consequent\w+",
    r"as a result",
    r"we conclude",
    r"in conclusion",
    r"this shows",
    r"this demonstrates",
    r"this proves",
    r"we find that",
];

const CAUSAL_PATTERNS: &[&str] = &[
    r"caus\w+",
    r"leads? to",
    r"results? in",
    r"due to",
    r"because of",
    r"affects?",
    r"influences?",
    r"contributes? to",
];

const FACTUAL_PATTERNS: &[&str] = &[
    r"\d+%",
    r"\d+ (times|percent|people|studies|participants)",
    r"research shows",
    r"studies? (show|indicate|suggest|demonstrate)",
    r"according to",
    r"data (shows?|indicates?|suggests?)",
    r"evidence suggests?",
    r"(is|are|was|were) \d+",
];

/// Quantitative magnitude phrase; a sentence matching no family but this one is still factual
const MAGNITUDE_PATTERN: &str = r"\d+\.?\d*\s*(percent|%|times|fold|million|billion|thousand)";

/// Classifies a sentence into at most one category
///
/// Families are tested in a fixed order (assumption, conclusion, causal,
/// factual) against the lower-cased sentence and the first family with any
/// matching pattern wins.
#[derive(Debug, Clone)]
pub struct ClaimClassifier {
    families: Vec<(ClaimCategory, RegexSet)>,
    magnitude: Regex,
}

impl ClaimClassifier {
    /// Compile the built-in pattern families
    pub fn new() -> Result<Self, ExtractorError> {
        let families = vec![
            (ClaimCategory::Assumption, RegexSet::new(ASSUMPTION_PATTERNS)?),
            (ClaimCategory::Conclusion, RegexSet::new(CONCLUSION_PATTERNS)?),
            (ClaimCategory::Causal, RegexSet::new(CAUSAL_PATTERNS)?),
            (ClaimCategory::Factual, RegexSet::new(FACTUAL_PATTERNS)?),
        ];
        Ok(Self {
            families,
            magnitude: Regex::new(MAGNITUDE_PATTERN)?,
        })
    }

    /// Category of `sentence`, or `None` if no family matches
    pub fn classify(&self, sentence: &str) -> Option<ClaimCategory> {
        let lower = sentence.to_lowercase();
        self.families
            .iter()
            .find(|(_, set)| set.is_match(&lower))
            .map(|(category, _)| *category)
            .or_else(|| {
                self.magnitude
                    .is_match(&lower)
                    .then_some(ClaimCategory::Factual)
            })
    }

    /// Evaluation order of the pattern families
    pub fn precedence(&self) -> Vec<ClaimCategory> {
        self.families.iter().map(|(category, _)| *category).collect()
    }
}
