//! Report sections and markdown parsing

use crate::ReportSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One headed section of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section heading, e.g. `Judgement`
    pub heading: String,
    /// Section text
    #[serde(alias = "text")]
    pub body: String,
}

impl ReportSection {
    /// Create a section
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// Split a markdown report into sections
///
/// A line starting with `#` always opens a section. A `Heading: text` line
/// (optionally bold) opens one only when `Heading` is in `schema`, so prose
/// containing colons stays in the current body. Text before the first
/// heading is dropped.
pub fn parse_markdown_report(text: &str, schema: &ReportSchema) -> Vec<ReportSection> {
    let mut sections: Vec<ReportSection> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('#') {
            let rest = rest.trim_start_matches('#').trim();
            let (heading, body) = split_heading(rest);
            if !heading.is_empty() {
                sections.push(ReportSection::new(heading, body));
            }
            continue;
        }

        let unbolded = trimmed.trim_start_matches('*');
        if let Some((head, rest)) = unbolded.split_once(':') {
            let head = head.trim().trim_end_matches('*').trim();
            if schema.canonical_heading(head).is_some() {
                let body = rest.trim().trim_start_matches('*').trim();
                sections.push(ReportSection::new(head, body));
                continue;
            }
        }

        if let Some(current) = sections.last_mut() {
            if !current.body.is_empty() || !trimmed.is_empty() {
                current.body.push('\n');
                current.body.push_str(line.trim_end());
            }
        }
    }

    for section in &mut sections {
        section.body = section.body.trim().to_string();
    }
    sections
}

fn split_heading(text: &str) -> (String, String) {
    let text = text.trim_matches('*').trim();
    match text.split_once(':') {
        Some((head, rest)) => (
            head.trim().trim_end_matches('*').trim().to_string(),
            rest.trim().trim_start_matches('*').trim().to_string(),
        ),
        None => (text.to_string(), String::new()),
    }
}

/// Individual entries of a source list, bullets and numbering removed
pub fn source_entries(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.trim_start_matches(['-', '*', '•', '+']);
            let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
            let line = if digits > 0 && line[digits..].starts_with(['.', ')']) {
                &line[digits + 1..]
            } else {
                line
            };
            line.trim().to_string()
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// An accepted report, sections in schema order under their canonical headings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    sections: Vec<ReportSection>,
    sources_heading: String,
}

impl FinalReport {
    pub(crate) fn new(sections: Vec<ReportSection>, sources_heading: String) -> Self {
        Self {
            sections,
            sources_heading,
        }
    }

    /// All sections
    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// Body of the section named `heading`, ignoring ASCII case
    pub fn section(&self, heading: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.heading.eq_ignore_ascii_case(heading))
            .map(|s| s.body.as_str())
    }

    /// Entries of the sources section
    pub fn sources(&self) -> Vec<String> {
        self.section(&self.sources_heading)
            .map(source_entries)
            .unwrap_or_default()
    }
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "## {}", section.heading)?;
            writeln!(f)?;
            writeln!(f, "{}", section.body)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hash_headings() {
        let text = "Preamble that is dropped\n\
                    # Claim\nWindmills harm birds\n\n\
                    ## Judgement: Misleading\n\
                    # Summary\nLine one\nLine two\n\
                    # Sources\n- https://doi.org/10.1038/ncomms2380\n";
        let sections = parse_markdown_report(text, &ReportSchema::default());
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0], ReportSection::new("Claim", "Windmills harm birds"));
        assert_eq!(sections[1], ReportSection::new("Judgement", "Misleading"));
        assert_eq!(sections[2].body, "Line one\nLine two");
        assert_eq!(sections[3].heading, "Sources");
    }

    #[test]
    fn test_parse_colon_headings() {
        let text = "**Claim:** Coffee cures colds\n\
                    Judgement: False\n\
                    Summary: Evidence: none found\n\
                    Note: this line stays in the summary\n\
                    Sources:\n1. arXiv:2301.00001\n";
        let sections = parse_markdown_report(text, &ReportSchema::default());
        let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Claim", "Judgement", "Summary", "Sources"]);
        assert_eq!(sections[0].body, "Coffee cures colds");
        assert_eq!(
            sections[2].body,
            "Evidence: none found\nNote: this line stays in the summary"
        );
        assert_eq!(sections[3].body, "1. arXiv:2301.00001");
    }

    #[test]
    fn test_parse_unknown_hash_heading_is_kept() {
        let sections = parse_markdown_report("# Verdict\nTrue", &ReportSchema::default());
        assert_eq!(sections, vec![ReportSection::new("Verdict", "True")]);
    }

    #[test]
    fn test_source_entries() {
        let body = "- First https://a.example\n* Second\n\n2) Third\n10. Fourth\n• Fifth";
        assert_eq!(
            source_entries(body),
            vec!["First https://a.example", "Second", "Third", "Fourth", "Fifth"]
        );
    }

    #[test]
    fn test_section_alias_text() {
        let section: ReportSection =
            serde_json::from_str(r#"{"heading": "Claim", "text": "X"}"#).unwrap();
        assert_eq!(section.body, "X");
    }

    #[test]
    fn test_final_report_accessors() {
        let report = FinalReport::new(
            vec![
                ReportSection::new("Claim", "X"),
                ReportSection::new("Sources", "- a\n- b"),
            ],
            "Sources".to_string(),
        );
        assert_eq!(report.section("claim"), Some("X"));
        assert_eq!(report.sources(), vec!["a", "b"]);
        assert_eq!(report.to_string(), "## Claim\n\nX\n\n## Sources\n\n- a\n- b\n");
    }
}
