//! Final-report validation logic

use crate::policy::{extract_urls, AnyOf, CorpusIdentifier, PrimarySourcePolicy};
use crate::report::{parse_markdown_report, source_entries, FinalReport, ReportSection};
use crate::{GatekeeperError, ReportSchema};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Session facts a report is judged against
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Whether a primary source has been read in this session
    pub primary_source_found: bool,
    /// Normalized URLs seen only as popular coverage
    pub popular_coverage: &'a BTreeSet<String>,
}

impl<'a> ReportContext<'a> {
    /// Create a context
    pub fn new(primary_source_found: bool, popular_coverage: &'a BTreeSet<String>) -> Self {
        Self {
            primary_source_found,
            popular_coverage,
        }
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Report accepted
    Accepted,

    /// Report rejected
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// No primary source was read before the report was emitted
    PrematureReport,

    /// A required heading is absent
    MissingSection(String),

    /// A heading outside the schema
    UnexpectedSection(String),

    /// A heading given more than once
    DuplicateSection(String),

    /// A section with no text
    EmptySection(String),

    /// A generic source such as "Wikipedia"
    PlaceholderSource(String),

    /// A cited source that was only seen as popular coverage
    PopularCoverageCited {
        /// The offending source entry
        source: String,
        /// The popular-coverage URL it cites
        url: String,
    },

    /// No cited source satisfies the primary-source policy
    NoPrimarySourceCited,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::PrematureReport => write!(
                f,
                "no primary source has been read yet; read at least one primary source before emitting the report"
            ),
            RejectionReason::MissingSection(h) => write!(f, "missing section '{}'", h),
            RejectionReason::UnexpectedSection(h) => write!(f, "unexpected section '{}'", h),
            RejectionReason::DuplicateSection(h) => write!(f, "section '{}' appears more than once", h),
            RejectionReason::EmptySection(h) => write!(f, "section '{}' is empty", h),
            RejectionReason::PlaceholderSource(s) => {
                write!(f, "'{}' is a generic placeholder, not a source", s)
            }
            RejectionReason::PopularCoverageCited { url, .. } => write!(
                f,
                "{} is popular coverage and cannot be listed as a primary source",
                url
            ),
            RejectionReason::NoPrimarySourceCited => {
                write!(f, "no listed source is a primary or academic source")
            }
        }
    }
}

/// Result of report validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the report passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,

    /// The normalized report, when accepted
    pub report: Option<FinalReport>,
}

impl ValidationResult {
    /// Whether the report was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Message describing every violation, suitable as tool feedback
    pub fn feedback(&self) -> String {
        let reasons: Vec<String> = self.reasons.iter().map(|r| r.to_string()).collect();
        format!("Report rejected: {}", reasons.join("; "))
    }
}

/// The ReportValidator decides whether a final report may end a session
#[derive(Debug, Clone)]
pub struct ReportValidator {
    schema: ReportSchema,
    policy: Arc<dyn PrimarySourcePolicy>,
    identifiers: CorpusIdentifier,
}

impl ReportValidator {
    /// Create a validator with the given schema and primary-source policy
    pub fn new(
        schema: ReportSchema,
        policy: Arc<dyn PrimarySourcePolicy>,
    ) -> Result<Self, GatekeeperError> {
        schema.validate().map_err(GatekeeperError::Config)?;
        Ok(Self {
            schema,
            policy,
            identifiers: CorpusIdentifier::new()?,
        })
    }

    /// Create a validator using [`AnyOf::academic`]
    pub fn with_default_policy(schema: ReportSchema) -> Result<Self, GatekeeperError> {
        Self::new(schema, Arc::new(AnyOf::academic()?))
    }

    /// The active schema
    pub fn schema(&self) -> &ReportSchema {
        &self.schema
    }

    /// The primary-source policy
    pub fn policy(&self) -> &Arc<dyn PrimarySourcePolicy> {
        &self.policy
    }

    /// Validate a markdown report
    pub fn validate_text(&self, text: &str, context: &ReportContext<'_>) -> ValidationResult {
        let sections = parse_markdown_report(text, &self.schema);
        self.validate(&sections, context)
    }

    /// Validate a sectioned report
    ///
    /// Every violation is reported, not just the first.
    pub fn validate(
        &self,
        sections: &[ReportSection],
        context: &ReportContext<'_>,
    ) -> ValidationResult {
        let mut reasons = Vec::new();

        // 1. Primary-source gate
        if !context.primary_source_found {
            reasons.push(RejectionReason::PrematureReport);
        }

        // 2. Heading set
        let mut accepted: Vec<(&str, &str)> = Vec::new();
        for section in sections {
            let heading = section.heading.trim().trim_end_matches(':').trim();
            match self.schema.canonical_heading(heading) {
                None => reasons.push(RejectionReason::UnexpectedSection(heading.to_string())),
                Some(canonical) if accepted.iter().any(|(h, _)| *h == canonical) => {
                    reasons.push(RejectionReason::DuplicateSection(canonical.to_string()))
                }
                Some(canonical) => {
                    let body = section.body.trim();
                    if body.is_empty() {
                        reasons.push(RejectionReason::EmptySection(canonical.to_string()));
                    }
                    accepted.push((canonical, body));
                }
            }
        }
        for heading in &self.schema.headings {
            if !accepted.iter().any(|(h, _)| *h == heading.as_str()) {
                reasons.push(RejectionReason::MissingSection(heading.clone()));
            }
        }

        // 3. Source list
        if let Some((_, body)) = accepted
            .iter()
            .find(|(h, _)| self.schema.is_sources_heading(h))
        {
            if !body.is_empty() {
                reasons.extend(self.check_sources(body, context));
            }
        }

        if !reasons.is_empty() {
            debug!("Report rejected with {} reason(s)", reasons.len());
            return ValidationResult {
                status: ValidationStatus::Rejected,
                reasons,
                report: None,
            };
        }

        let ordered = self
            .schema
            .headings
            .iter()
            .filter_map(|heading| {
                accepted
                    .iter()
                    .find(|(h, _)| *h == heading.as_str())
                    .map(|(h, body)| ReportSection::new(*h, *body))
            })
            .collect();
        ValidationResult {
            status: ValidationStatus::Accepted,
            reasons,
            report: Some(FinalReport::new(ordered, self.schema.sources_heading.clone())),
        }
    }

    fn check_sources(&self, body: &str, context: &ReportContext<'_>) -> Vec<RejectionReason> {
        let mut reasons = Vec::new();
        let entries = source_entries(body);

        for entry in &entries {
            if self.is_placeholder(entry) {
                reasons.push(RejectionReason::PlaceholderSource(entry.clone()));
                continue;
            }
            if self.schema.reject_popular_sources {
                let popular = extract_urls(entry)
                    .into_iter()
                    .find(|url| is_popular(url, context.popular_coverage));
                if let Some(url) = popular {
                    reasons.push(RejectionReason::PopularCoverageCited {
                        source: entry.clone(),
                        url,
                    });
                }
            }
        }

        if self.schema.require_cited_primary && !entries.iter().any(|e| self.policy.is_primary(e)) {
            reasons.push(RejectionReason::NoPrimarySourceCited);
        }
        reasons
    }

    fn is_placeholder(&self, entry: &str) -> bool {
        let lower = entry.to_lowercase();
        let core = lower.trim_matches(|c: char| !c.is_alphanumeric());
        // "Google Scholar: https://doi.org/..." names a real document
        let locatable = !extract_urls(entry).is_empty() || self.identifiers.is_primary(entry);
        let generic = self.schema.placeholders.iter().any(|p| {
            core == p || (!locatable && core.starts_with(&format!("{} ", p)))
        });
        let encyclopedia = extract_urls(entry).iter().any(|u| {
            url::Url::parse(u)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.ends_with("wikipedia.org")))
                .unwrap_or(false)
        });
        generic || encyclopedia
    }
}

fn comparable(url: &str) -> &str {
    let url = url.trim();
    let url = url.split('#').next().unwrap_or(url);
    url.trim_end_matches('/')
}

fn is_popular(url: &str, popular: &BTreeSet<String>) -> bool {
    let url = comparable(url);
    popular.iter().any(|p| comparable(p) == url)
}
