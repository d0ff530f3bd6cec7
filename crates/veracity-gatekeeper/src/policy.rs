//! Primary-source policies
//!
//! A policy answers one question: does this reference (a URL, or a citation
//! line containing URLs or identifiers) point at an authoritative, original
//! source? The orchestration loop asks it about every page and document it
//! reads; the validator asks it about every cited source.

use crate::GatekeeperError;
use regex::RegexSet;
use std::fmt;

/// Hosts treated as primary by [`DomainAllowList::academic`]
const ACADEMIC_DOMAINS: [&str; 12] = [
    "arxiv.org",
    "doi.org",
    "nih.gov",
    "nature.com",
    "science.org",
    "sciencedirect.com",
    "springer.com",
    "wiley.com",
    "plos.org",
    "biorxiv.org",
    "medrxiv.org",
    "semanticscholar.org",
];

/// Host suffixes of government and university sites
const INSTITUTIONAL_SUFFIXES: [&str; 2] = [".gov", ".edu"];

const IDENTIFIER_PATTERNS: [&str; 3] = [
    r"(?i)arxiv\.org/(?:abs|pdf)/(?:\d{4}\.\d{4,5}|[a-z\-]+(?:\.[a-z]{2})?/\d{7})",
    r"(?i)\barxiv:\s*\d{4}\.\d{4,5}",
    r"\b10\.\d{4,9}/[-._;()/:A-Za-z0-9]+",
];

/// Decides whether a reference is an authoritative primary source
pub trait PrimarySourcePolicy: Send + Sync + fmt::Debug {
    /// Whether `reference` points at a primary source
    fn is_primary(&self, reference: &str) -> bool;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Every `http(s)://` URL in `text`, with surrounding brackets and trailing
/// punctuation removed
pub fn extract_urls(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|token| {
            let start = token.find("https://").or_else(|| token.find("http://"))?;
            let url = token[start..]
                .trim_end_matches(|c: char| matches!(c, ')' | ']' | '>' | '.' | ',' | ';' | '"' | '\''));
            (url.len() > "https://".len()).then(|| url.to_string())
        })
        .collect()
}

/// Primary if the host is an allow-listed domain, a subdomain of one, or an
/// institutional host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAllowList {
    domains: Vec<String>,
    suffixes: Vec<String>,
}

impl DomainAllowList {
    /// Allow exactly `domains` (and their subdomains)
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.into().trim().to_lowercase())
                .collect(),
            suffixes: Vec::new(),
        }
    }

    /// Scholarly publishers and repositories plus `.gov` and `.edu` hosts
    pub fn academic() -> Self {
        Self::new(ACADEMIC_DOMAINS).with_suffixes(INSTITUTIONAL_SUFFIXES)
    }

    /// Also allow every host ending in one of `suffixes`
    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suffixes
            .extend(suffixes.into_iter().map(|s| s.into().to_lowercase()));
        self
    }

    /// Whether `host` is allowed
    pub fn allows_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_lowercase();
        self.domains
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
            || self.suffixes.iter().any(|s| host.ends_with(s.as_str()))
    }
}

impl PrimarySourcePolicy for DomainAllowList {
    fn is_primary(&self, reference: &str) -> bool {
        extract_urls(reference).iter().any(|raw| {
            url::Url::parse(raw)
                .ok()
                .and_then(|u| u.host_str().map(|h| self.allows_host(h)))
                .unwrap_or(false)
        })
    }

    fn name(&self) -> &str {
        "domain_allow_list"
    }
}

/// Primary if the reference carries an arXiv identifier or a DOI
#[derive(Debug, Clone)]
pub struct CorpusIdentifier {
    patterns: RegexSet,
}

impl CorpusIdentifier {
    /// Create the identifier matcher
    pub fn new() -> Result<Self, GatekeeperError> {
        Ok(Self {
            patterns: RegexSet::new(IDENTIFIER_PATTERNS)?,
        })
    }
}

impl PrimarySourcePolicy for CorpusIdentifier {
    fn is_primary(&self, reference: &str) -> bool {
        self.patterns.is_match(reference)
    }

    fn name(&self) -> &str {
        "corpus_identifier"
    }
}

/// Primary if any inner policy says so
#[derive(Debug, Default)]
pub struct AnyOf {
    policies: Vec<Box<dyn PrimarySourcePolicy>>,
}

impl AnyOf {
    /// Combine `policies`
    pub fn new(policies: Vec<Box<dyn PrimarySourcePolicy>>) -> Self {
        Self { policies }
    }

    /// [`DomainAllowList::academic`] or [`CorpusIdentifier`]
    pub fn academic() -> Result<Self, GatekeeperError> {
        Ok(Self::new(vec![
            Box::new(DomainAllowList::academic()),
            Box::new(CorpusIdentifier::new()?),
        ]))
    }

    /// Add another policy
    pub fn with(mut self, policy: Box<dyn PrimarySourcePolicy>) -> Self {
        self.policies.push(policy);
        self
    }
}

impl PrimarySourcePolicy for AnyOf {
    fn is_primary(&self, reference: &str) -> bool {
        self.policies.iter().any(|p| p.is_primary(reference))
    }

    fn name(&self) -> &str {
        "any_of"
    }
}
