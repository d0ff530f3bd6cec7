//! Report schema configuration

use serde::{Deserialize, Serialize};

/// Headings every final report must carry, in presentation order
pub const DEFAULT_HEADINGS: [&str; 4] = ["Claim", "Judgement", "Summary", "Sources"];

/// Source entries that name no actual source
pub const DEFAULT_PLACEHOLDERS: [&str; 10] = [
    "wikipedia",
    "various",
    "various sources",
    "internet",
    "the internet",
    "google",
    "n/a",
    "unknown",
    "online sources",
    "multiple sources",
];

/// Rules a final report is validated against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSchema {
    /// Exact set of section headings; no more, no fewer
    pub headings: Vec<String>,

    /// Heading of the section listing sources
    pub sources_heading: String,

    /// Source entries rejected as generic placeholders (compared lower-case)
    pub placeholders: Vec<String>,

    /// Require at least one cited source to satisfy the primary-source policy
    pub require_cited_primary: bool,

    /// Reject sources that were only seen as popular coverage
    pub reject_popular_sources: bool,
}

impl Default for ReportSchema {
    fn default() -> Self {
        Self {
            headings: DEFAULT_HEADINGS.iter().map(|h| h.to_string()).collect(),
            sources_heading: "Sources".to_string(),
            placeholders: DEFAULT_PLACEHOLDERS.iter().map(|p| p.to_string()).collect(),
            require_cited_primary: true,
            reject_popular_sources: true,
        }
    }
}

impl ReportSchema {
    /// Only the heading set is enforced; source lists are taken as written
    pub fn lenient() -> Self {
        Self {
            require_cited_primary: false,
            reject_popular_sources: false,
            ..Default::default()
        }
    }

    /// Whether `heading` names the sources section
    pub fn is_sources_heading(&self, heading: &str) -> bool {
        heading.eq_ignore_ascii_case(&self.sources_heading)
    }

    /// The configured heading matching `heading`, ignoring ASCII case
    pub fn canonical_heading(&self, heading: &str) -> Option<&str> {
        self.headings
            .iter()
            .find(|h| h.eq_ignore_ascii_case(heading))
            .map(|h| h.as_str())
    }

    /// Validate the schema
    pub fn validate(&self) -> Result<(), String> {
        if self.headings.is_empty() {
            return Err("headings must not be empty".to_string());
        }
        for (i, heading) in self.headings.iter().enumerate() {
            if heading.trim().is_empty() {
                return Err("headings must not contain blank entries".to_string());
            }
            if self.headings[..i]
                .iter()
                .any(|h| h.eq_ignore_ascii_case(heading))
            {
                return Err(format!("heading '{}' is listed twice", heading));
            }
        }
        if self.canonical_heading(&self.sources_heading).is_none() {
            return Err(format!(
                "sources_heading '{}' is not one of the headings",
                self.sources_heading
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
