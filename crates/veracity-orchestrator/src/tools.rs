//! Tool kinds, argument parsing and declarations

use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use veracity_domain::traits::{ToolDeclaration, ToolInvocation};
use veracity_domain::ToolError;
use veracity_gatekeeper::ReportSection;

/// Every tool the engine may call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolKind {
    /// General web search
    SearchWeb,
    /// Fetch a page's visible text
    ReadWebPage,
    /// Extract a PDF's text
    ReadPdf,
    /// Evidence gathering for one statement
    FactCheck,
    /// Full claim analysis of a document
    AnalyzeDocument,
    /// Submit the final report
    EmitReport,
}

impl ToolKind {
    /// All tools in declaration order
    pub const ALL: [ToolKind; 6] = [
        ToolKind::SearchWeb,
        ToolKind::ReadWebPage,
        ToolKind::ReadPdf,
        ToolKind::FactCheck,
        ToolKind::AnalyzeDocument,
        ToolKind::EmitReport,
    ];

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::SearchWeb => "search_web",
            ToolKind::ReadWebPage => "read_web_page",
            ToolKind::ReadPdf => "read_pdf",
            ToolKind::FactCheck => "fact_check",
            ToolKind::AnalyzeDocument => "analyze_document",
            ToolKind::EmitReport => "emit_report",
        }
    }

    /// Whether one call runs a whole pipeline of network requests
    pub fn is_composite(&self) -> bool {
        matches!(self, ToolKind::FactCheck | ToolKind::AnalyzeDocument)
    }

    /// Look up a tool by wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    fn describe(&self) -> &'static str {
        match self {
            ToolKind::SearchWeb => "Search the web. Returns titles, URLs and snippets.",
            ToolKind::ReadWebPage => {
                "Read the visible text of a web page. Each URL can be read once per session."
            }
            ToolKind::ReadPdf => {
                "Read the text of a PDF at a URL. Each URL can be read once per session."
            }
            ToolKind::FactCheck => {
                "Check one statement against web search and scholarly papers. Returns a confidence tier and the documents examined."
            }
            ToolKind::AnalyzeDocument => {
                "Extract the claims of a PDF document, fact-check the most important ones and return a credibility report."
            }
            ToolKind::EmitReport => {
                "Submit the final report. Use only once a primary source has been read, and only by itself."
            }
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Report content submitted through `emit_report`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDraft {
    /// Explicit sections
    Sections(Vec<ReportSection>),
    /// Markdown text to be split into sections
    Text(String),
}

/// A parsed, typed tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    /// `search_web(query)`
    SearchWeb {
        /// Query text
        query: String,
    },
    /// `read_web_page(url)`
    ReadWebPage {
        /// Page URL
        url: String,
    },
    /// `read_pdf(url)`
    ReadPdf {
        /// PDF URL
        url: String,
    },
    /// `fact_check(statement)`
    FactCheck {
        /// Statement to check
        statement: String,
    },
    /// `analyze_document(url, max_claims?)`
    AnalyzeDocument {
        /// Document URL
        url: String,
        /// Claims to fact-check
        max_claims: Option<usize>,
    },
    /// `emit_report(sections | text)`
    EmitReport(ReportDraft),
}

#[derive(Deserialize)]
struct QueryArgs {
    query: String,
}

#[derive(Deserialize)]
struct UrlArgs {
    url: String,
}

#[derive(Deserialize)]
struct StatementArgs {
    statement: String,
}

#[derive(Deserialize)]
struct AnalyzeArgs {
    url: String,
    // engines encode integers as JSON doubles
    max_claims: Option<f64>,
}

#[derive(Deserialize)]
struct ReportArgs {
    sections: Option<Vec<ReportSection>>,
    text: Option<String>,
}

fn args<T: for<'de> Deserialize<'de>>(invocation: &ToolInvocation) -> Result<T, ToolError> {
    serde_json::from_value(invocation.args.clone()).map_err(|e| {
        ToolError::Validation(format!("Invalid arguments for {}: {}", invocation.name, e))
    })
}

fn non_empty(name: &str, field: &str, value: String) -> Result<String, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::Validation(format!(
            "{}: '{}' must not be empty",
            name, field
        )));
    }
    Ok(trimmed.to_string())
}

impl ToolCall {
    /// Parse an engine invocation
    ///
    /// Unknown names and malformed arguments are validation errors.
    pub fn parse(invocation: &ToolInvocation) -> Result<Self, ToolError> {
        let kind = ToolKind::from_name(&invocation.name).ok_or_else(|| {
            ToolError::Validation(format!("Unknown tool '{}'", invocation.name))
        })?;
        let name = kind.name();

        let call = match kind {
            ToolKind::SearchWeb => ToolCall::SearchWeb {
                query: non_empty(name, "query", args::<QueryArgs>(invocation)?.query)?,
            },
            ToolKind::ReadWebPage => ToolCall::ReadWebPage {
                url: non_empty(name, "url", args::<UrlArgs>(invocation)?.url)?,
            },
            ToolKind::ReadPdf => ToolCall::ReadPdf {
                url: non_empty(name, "url", args::<UrlArgs>(invocation)?.url)?,
            },
            ToolKind::FactCheck => ToolCall::FactCheck {
                statement: non_empty(name, "statement", args::<StatementArgs>(invocation)?.statement)?,
            },
            ToolKind::AnalyzeDocument => {
                let parsed = args::<AnalyzeArgs>(invocation)?;
                let max_claims = match parsed.max_claims {
                    Some(n) if n >= 1.0 && n.fract() == 0.0 => Some(n as usize),
                    Some(n) => {
                        return Err(ToolError::Validation(format!(
                            "{}: 'max_claims' must be a positive integer, got {}",
                            name, n
                        )))
                    }
                    None => None,
                };
                ToolCall::AnalyzeDocument {
                    url: non_empty(name, "url", parsed.url)?,
                    max_claims,
                }
            }
            ToolKind::EmitReport => {
                let parsed = args::<ReportArgs>(invocation)?;
                match (parsed.sections, parsed.text) {
                    (Some(sections), _) if !sections.is_empty() => {
                        ToolCall::EmitReport(ReportDraft::Sections(sections))
                    }
                    (_, Some(text)) if !text.trim().is_empty() => {
                        ToolCall::EmitReport(ReportDraft::Text(text))
                    }
                    _ => {
                        return Err(ToolError::Validation(format!(
                            "{}: provide either 'sections' or 'text'",
                            name
                        )))
                    }
                }
            }
        };
        Ok(call)
    }

    /// Kind of this call
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::SearchWeb { .. } => ToolKind::SearchWeb,
            ToolCall::ReadWebPage { .. } => ToolKind::ReadWebPage,
            ToolCall::ReadPdf { .. } => ToolKind::ReadPdf,
            ToolCall::FactCheck { .. } => ToolKind::FactCheck,
            ToolCall::AnalyzeDocument { .. } => ToolKind::AnalyzeDocument,
            ToolCall::EmitReport(_) => ToolKind::EmitReport,
        }
    }

    /// URL read by this call, if it reads one
    pub fn url(&self) -> Option<&str> {
        match self {
            ToolCall::ReadWebPage { url }
            | ToolCall::ReadPdf { url }
            | ToolCall::AnalyzeDocument { url, .. } => Some(url.as_str()),
            _ => None,
        }
    }

    /// Short description for logs
    pub fn summary(&self) -> String {
        let detail = match self {
            ToolCall::SearchWeb { query } => query.as_str(),
            ToolCall::FactCheck { statement } => statement.as_str(),
            ToolCall::ReadWebPage { url }
            | ToolCall::ReadPdf { url }
            | ToolCall::AnalyzeDocument { url, .. } => url.as_str(),
            ToolCall::EmitReport(_) => "",
        };
        let short: String = detail.chars().take(80).collect();
        format!("{}({})", self.kind(), short)
    }
}

fn string_param(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

/// Declarations for every tool offered in a session
///
/// `emit_report` is only declared when a structured report is required.
pub fn declarations(structured_report: bool, headings: &[String]) -> Vec<ToolDeclaration> {
    ToolKind::ALL
        .into_iter()
        .filter(|kind| structured_report || *kind != ToolKind::EmitReport)
        .map(|kind| {
            let parameters = match kind {
                ToolKind::SearchWeb => json!({
                    "type": "object",
                    "properties": { "query": string_param("The search query.") },
                    "required": ["query"],
                }),
                ToolKind::ReadWebPage => json!({
                    "type": "object",
                    "properties": { "url": string_param("The URL of the web page to read.") },
                    "required": ["url"],
                }),
                ToolKind::ReadPdf => json!({
                    "type": "object",
                    "properties": { "url": string_param("The URL of the PDF to read.") },
                    "required": ["url"],
                }),
                ToolKind::FactCheck => json!({
                    "type": "object",
                    "properties": { "statement": string_param("One factual statement to check.") },
                    "required": ["statement"],
                }),
                ToolKind::AnalyzeDocument => json!({
                    "type": "object",
                    "properties": {
                        "url": string_param("The URL of the PDF document to analyze."),
                        "max_claims": {
                            "type": "integer",
                            "description": "How many claims to fact-check.",
                        },
                    },
                    "required": ["url"],
                }),
                ToolKind::EmitReport => json!({
                    "type": "object",
                    "properties": {
                        "sections": {
                            "type": "array",
                            "description": format!(
                                "Report sections with exactly these headings: {}.",
                                headings.join(", ")
                            ),
                            "items": {
                                "type": "object",
                                "properties": {
                                    "heading": string_param("Section heading."),
                                    "text": string_param("Section text."),
                                },
                                "required": ["heading", "text"],
                            },
                        },
                        "text": string_param("Alternatively, the whole report as markdown with one '#' heading per section."),
                    },
                }),
            };
            ToolDeclaration {
                name: kind.name().to_string(),
                description: kind.describe().to_string(),
                parameters,
            }
        })
        .collect()
}
