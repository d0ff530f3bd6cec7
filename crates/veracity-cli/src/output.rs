//! Output formatting for the CLI.

use crate::error::Result;
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use serde_json::json;
use veracity_domain::{ClaimCategory, Confidence, Connection, EvidenceResult, VeracityReport};
use veracity_extractor::ExtractedClaims;
use veracity_orchestrator::{SessionOutcome, SessionResult};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of a verification session.
    pub fn session(&self, result: &SessionResult) -> Result<String> {
        if self.format == OutputFormat::Json {
            let (outcome, report) = match &result.outcome {
                SessionOutcome::Accepted(report) => ("accepted", json!(report.sections())),
                SessionOutcome::Unstructured(text) => ("unstructured", json!(text)),
                SessionOutcome::Cancelled => ("cancelled", serde_json::Value::Null),
            };
            return Ok(serde_json::to_string_pretty(&json!({
                "outcome": outcome,
                "report": report,
                "summary": result.summary,
            }))?);
        }

        let summary = &result.summary;
        let mut out = match &result.outcome {
            SessionOutcome::Accepted(report) => report.to_string(),
            SessionOutcome::Unstructured(text) => format!("{}\n", text.trim_end()),
            SessionOutcome::Cancelled => {
                return Ok(self.warning("Session cancelled before a report was produced"))
            }
        };
        out.push('\n');
        out.push_str(&self.colorize(
            &format!(
                "Session {}: {} turn(s), {} tool call(s), {} URL(s) read",
                summary.session_id,
                summary.turns,
                summary.tool_calls,
                summary.visited_urls.len()
            ),
            Color::BrightBlack,
        ));
        if !summary.primary_sources.is_empty() {
            out.push('\n');
            out.push_str(&self.info(&format!(
                "Primary sources: {}",
                summary.primary_sources.join(", ")
            )));
        }
        Ok(out)
    }

    /// Format an analysis report.
    pub fn veracity_report(&self, report: &VeracityReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Text => {
                let score = report.credibility_score();
                let headline = format!("Credibility {}/10: {}", score, report.credibility().assessment);
                Ok(format!("{}\n\n{}", self.colorize(&headline, score_color(score)), report))
            }
        }
    }

    /// Format the evidence gathered for one statement.
    pub fn evidence(&self, result: &EvidenceResult) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(result)?);
        }

        let mut lines = vec![
            format!("Statement: {}", result.claim.text()),
            self.colorize(
                &format!(
                    "Confidence: {} (score {}/10)",
                    result.confidence,
                    result.individual_score()
                ),
                confidence_color(result.confidence),
            ),
            format!("Assessment: {}", result.assessment),
        ];
        if !result.supporting_sources.is_empty() {
            lines.push(format!("Supporting: {}", result.supporting_sources.join(", ")));
        }

        if !result.corpus_hits.is_empty() {
            lines.push(String::new());
            lines.push("Corpus:".to_string());
            for hit in &result.corpus_hits {
                lines.push(format!("- {}", hit.title));
                if let Some(url) = &hit.url {
                    lines.push(format!("  {}", url));
                }
                lines.push(format!("  {}", hit.relevance()));
                if let Some(err) = &hit.text_error {
                    lines.push(format!("  {}", self.colorize(err, Color::Yellow)));
                }
            }
        }

        lines.push(String::new());
        match &result.web_error {
            Some(err) => lines.push(self.warning(err)),
            None if result.web_hits.is_empty() => lines.push("Web: no results".to_string()),
            None => {
                lines.push("Web:".to_string());
                for hit in &result.web_hits {
                    lines.push(format!("- {} <{}>", hit.title, hit.url));
                }
            }
        }
        Ok(lines.join("\n"))
    }

    /// Format extracted claims and their connections.
    pub fn extraction(&self, extracted: &ExtractedClaims, connections: &[Connection]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&json!({
                "claims": extracted.claims,
                "total": extracted.total,
                "sentences_considered": extracted.sentences_considered,
                "connections": connections,
            }))?);
        }

        if extracted.claims.is_empty() {
            return Ok(self.warning("No claims found."));
        }

        let mut lines = vec![format!(
            "{} claim(s) from {} sentence(s)",
            extracted.total, extracted.sentences_considered
        )];
        for category in ClaimCategory::ALL {
            let claims = extracted.claims.get(category);
            if claims.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(self.colorize(&format!("{}s ({})", category.label(), claims.len()), Color::Cyan));
            for (i, claim) in claims.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, claim.text()));
            }
        }

        if !connections.is_empty() {
            lines.push(String::new());
            lines.push(self.colorize(&format!("Connections ({})", connections.len()), Color::Cyan));
            for connection in connections {
                let shared: Vec<&str> = connection
                    .shared_keywords()
                    .iter()
                    .map(String::as_str)
                    .collect();
                lines.push(format!(
                    "- [{}] {} -> {} (shared: {})",
                    connection.kind().strength(),
                    connection.from().text(),
                    connection.to().text(),
                    shared.join(", ")
                ));
            }
        }
        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), Color::Red)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.color(color).to_string()
    }
}

fn score_color(score: u8) -> Color {
    match score {
        8..=10 => Color::Green,
        5..=7 => Color::Yellow,
        _ => Color::Red,
    }
}

fn confidence_color(confidence: Confidence) -> Color {
    match confidence {
        Confidence::High => Color::Green,
        Confidence::Medium => Color::Yellow,
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{Claim, CorpusHit, MatchType, WebHit};
    use veracity_orchestrator::SessionSummary;

    fn summary() -> SessionSummary {
        SessionSummary {
            session_id: "0190aaaa-0000-7000-8000-000000000000".to_string(),
            turns: 3,
            tool_calls: 2,
            visited_urls: vec!["https://arxiv.org/pdf/1234.5678".to_string()],
            primary_sources: vec!["https://arxiv.org/pdf/1234.5678".to_string()],
            popular_coverage: vec![],
        }
    }

    fn evidence() -> EvidenceResult {
        EvidenceResult {
            claim: Claim::new("Cats kill billions of birds every year", ClaimCategory::Factual),
            web_hits: vec![WebHit {
                title: "Cats and birds".to_string(),
                url: "https://news.example.com/cats".to_string(),
                snippet: String::new(),
            }],
            web_error: None,
            corpus_hits: vec![CorpusHit {
                title: "Bird mortality".to_string(),
                url: Some("https://arxiv.org/abs/1234.5678".to_string()),
                source_id: Some("1234.5678".to_string()),
                authors: vec![],
                abstract_excerpt: String::new(),
                match_type: MatchType::Verbatim,
                matched_terms: None,
                text_error: None,
            }],
            confidence: Confidence::High,
            assessment: "Strong evidence found".to_string(),
            supporting_sources: vec!["1234.5678".to_string()],
            found_in_source: true,
        }
    }

    #[test]
    fn test_unstructured_session_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let result = SessionResult {
            outcome: SessionOutcome::Unstructured("Judgement: False".to_string()),
            summary: summary(),
        };
        let output = formatter.session(&result).unwrap();
        assert!(output.starts_with("Judgement: False\n"));
        assert!(output.contains("3 turn(s), 2 tool call(s), 1 URL(s) read"));
        assert!(output.contains("Primary sources: https://arxiv.org/pdf/1234.5678"));
    }

    #[test]
    fn test_cancelled_session_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let result = SessionResult {
            outcome: SessionOutcome::Cancelled,
            summary: summary(),
        };
        let value: serde_json::Value = serde_json::from_str(&formatter.session(&result).unwrap()).unwrap();
        assert_eq!(value["outcome"], "cancelled");
        assert!(value["report"].is_null());
        assert_eq!(value["summary"]["turns"], 3);
    }

    #[test]
    fn test_evidence_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.evidence(&evidence()).unwrap();
        assert!(output.contains("Confidence: High (score 9/10)"));
        assert!(output.contains("Statement found directly in document"));
        assert!(output.contains("- Cats and birds <https://news.example.com/cats>"));
    }

    #[test]
    fn test_evidence_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.evidence(&evidence()).unwrap();
        assert!(output.contains("\"found_in_source\": true"));
    }

    #[test]
    fn test_empty_extraction() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.extraction(&ExtractedClaims::default(), &[]).unwrap();
        assert!(output.contains("No claims found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }

    #[test]
    fn test_score_color() {
        assert_eq!(score_color(9), Color::Green);
        assert_eq!(score_color(5), Color::Yellow);
        assert_eq!(score_color(1), Color::Red);
    }
}
