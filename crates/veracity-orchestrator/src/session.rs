//! The tool-orchestration loop
//!
//! One call to [`Orchestrator::verify`] drives one session:
//!
//! ```text
//! AwaitingModel → ExecutingTools → AwaitingModel → … → Terminated
//! ```
//!
//! Each batch of tool calls is planned serially (parsing, dedup, disabled
//! tools, report validation) and then executed with bounded concurrency.
//! Results go back to the engine in request order.

use crate::config::SessionConfig;
use crate::error::{ExhaustionReason, OrchestratorError};
use crate::prompt::system_instruction;
use crate::state::{ConversationState, Turn};
use crate::tools::{declarations, ReportDraft, ToolCall, ToolKind};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;
use veracity_domain::traits::{
    CorpusProvider, DocumentExtractor, EngineMessage, PageFetcher, ReasoningEngine,
    SearchProvider, ToolInvocation, ToolResponse,
};
use veracity_domain::{Claim, ClaimCategory, DocumentSource, EvidenceResult, MatchType, ToolError};
use veracity_evidence::{Analyzer, EvidenceConfig, EvidenceGatherer};
use veracity_extractor::{ClaimExtractor, ExtractorConfig};
use veracity_gatekeeper::{FinalReport, PrimarySourcePolicy, ReportContext, ReportValidator};

/// Collaborators that tool calls are executed against
#[derive(Clone)]
pub struct Toolbox {
    /// `search_web`
    pub search: Arc<dyn SearchProvider>,
    /// `read_web_page`
    pub fetcher: Arc<dyn PageFetcher>,
    /// `read_pdf`
    pub documents: Arc<dyn DocumentExtractor>,
    /// `fact_check`
    pub gatherer: Arc<EvidenceGatherer>,
    /// `analyze_document`
    pub analyzer: Arc<Analyzer>,
}

impl Toolbox {
    /// Wire the evidence pipeline on top of the raw collaborators
    pub fn new(
        search: Arc<dyn SearchProvider>,
        corpus: Arc<dyn CorpusProvider>,
        fetcher: Arc<dyn PageFetcher>,
        documents: Arc<dyn DocumentExtractor>,
        evidence: EvidenceConfig,
        extraction: ExtractorConfig,
    ) -> Result<Self, OrchestratorError> {
        let gatherer = Arc::new(
            EvidenceGatherer::new(Arc::clone(&search), corpus, Arc::clone(&documents), evidence)
                .map_err(|e| OrchestratorError::Config(e.to_string()))?,
        );
        Self::from_parts(search, fetcher, documents, gatherer, extraction)
    }

    /// Use an existing gatherer
    pub fn from_parts(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        documents: Arc<dyn DocumentExtractor>,
        gatherer: Arc<EvidenceGatherer>,
        extraction: ExtractorConfig,
    ) -> Result<Self, OrchestratorError> {
        let extractor = ClaimExtractor::new(extraction)
            .map_err(|e| OrchestratorError::Config(e.to_string()))?;
        let analyzer = Arc::new(Analyzer::new(
            extractor,
            Arc::clone(&gatherer),
            Arc::clone(&documents),
        ));
        Ok(Self {
            search,
            fetcher,
            documents,
            gatherer,
            analyzer,
        })
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A report passed validation
    Accepted(FinalReport),
    /// The engine's final plain-text reply (only without `emit_report`)
    Unstructured(String),
    /// Cancelled at a turn boundary; no report
    Cancelled,
}

/// What happened during a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Session identifier (UUIDv7)
    pub session_id: String,
    /// Engine replies received
    pub turns: usize,
    /// Tool calls that reached a collaborator
    pub tool_calls: usize,
    /// URLs read, normalized
    pub visited_urls: Vec<String>,
    /// Sources that satisfied the primary-source policy
    pub primary_sources: Vec<String>,
    /// Sources seen that did not
    pub popular_coverage: Vec<String>,
}

impl SessionSummary {
    fn new(session_id: Uuid, state: &ConversationState) -> Self {
        Self {
            session_id: session_id.to_string(),
            turns: state.model_turns(),
            tool_calls: state.tool_calls_executed(),
            visited_urls: state.visited_urls().iter().cloned().collect(),
            primary_sources: state.primary_sources().to_vec(),
            popular_coverage: state.popular_coverage().iter().cloned().collect(),
        }
    }
}

/// Outcome of a finished session plus its summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    /// How the session ended
    pub outcome: SessionOutcome,
    /// What happened along the way
    pub summary: SessionSummary,
}

struct ToolOutput {
    content: String,
    produced: bool,
    read: Vec<String>,
    seen: Vec<String>,
}

impl ToolOutput {
    fn new(content: String) -> Self {
        Self {
            content,
            produced: true,
            read: Vec::new(),
            seen: Vec::new(),
        }
    }
}

/// Result of one tool call, ready to be folded into the state
struct Executed {
    kind: Option<ToolKind>,
    response: ToolResponse,
    produced: bool,
    reached_provider: bool,
    credential_failure: bool,
    read: Vec<String>,
    seen: Vec<String>,
}

impl Executed {
    fn immediate(kind: Option<ToolKind>, response: ToolResponse, produced: bool) -> Self {
        Self {
            kind,
            response,
            produced,
            reached_provider: false,
            credential_failure: false,
            read: Vec::new(),
            seen: Vec::new(),
        }
    }

    fn failed(kind: Option<ToolKind>, name: &str, err: &ToolError) -> Self {
        let mut content = format!("{}: {}", err.tag(), err.message());
        if let ToolError::Credential(_) = err {
            content.push_str(&format!(
                ". {} is unavailable for the rest of this session",
                name
            ));
        }
        Self::immediate(kind, ToolResponse::error(name, content), true)
    }
}

enum Planned {
    Ready(Executed),
    Run(ToolCall),
}

enum Batch {
    Run(Vec<Planned>),
    Accepted(FinalReport),
}

/// Drives verification sessions against a reasoning engine
pub struct Orchestrator {
    engine: Arc<dyn ReasoningEngine>,
    tools: Toolbox,
    validator: ReportValidator,
    config: SessionConfig,
}

impl Orchestrator {
    /// Create an orchestrator with the default academic primary-source policy
    pub fn new(
        engine: Arc<dyn ReasoningEngine>,
        tools: Toolbox,
        config: SessionConfig,
    ) -> Result<Self, OrchestratorError> {
        config.validate().map_err(OrchestratorError::Config)?;
        let validator = ReportValidator::with_default_policy(config.report_schema.clone())
            .map_err(|e| OrchestratorError::Config(e.to_string()))?;
        Ok(Self {
            engine,
            tools,
            validator,
            config,
        })
    }

    /// Create an orchestrator with a custom primary-source policy
    pub fn with_policy(
        engine: Arc<dyn ReasoningEngine>,
        tools: Toolbox,
        config: SessionConfig,
        policy: Arc<dyn PrimarySourcePolicy>,
    ) -> Result<Self, OrchestratorError> {
        config.validate().map_err(OrchestratorError::Config)?;
        let validator = ReportValidator::new(config.report_schema.clone(), policy)
            .map_err(|e| OrchestratorError::Config(e.to_string()))?;
        Ok(Self {
            engine,
            tools,
            validator,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Verify a claim or document text
    pub async fn verify(&self, input: &str) -> Result<SessionResult, OrchestratorError> {
        self.verify_with_cancel(input, CancellationToken::new())
            .await
    }

    /// Verify, stopping at the next turn boundary once `cancel` fires
    pub async fn verify_with_cancel(
        &self,
        input: &str,
        cancel: CancellationToken,
    ) -> Result<SessionResult, OrchestratorError> {
        let session_id = Uuid::now_v7();
        let span = info_span!("session", id = %session_id);
        self.run_session(session_id, input, cancel)
            .instrument(span)
            .await
    }

    async fn run_session(
        &self,
        session_id: Uuid,
        input: &str,
        cancel: CancellationToken,
    ) -> Result<SessionResult, OrchestratorError> {
        let mut state = ConversationState::new();
        let cancelled = |state: &mut ConversationState| {
            state.terminate();
            info!("Session cancelled");
            SessionResult {
                outcome: SessionOutcome::Cancelled,
                summary: SessionSummary::new(session_id, state),
            }
        };
        if cancel.is_cancelled() {
            return Ok(cancelled(&mut state));
        }

        let tools = declarations(
            self.config.structured_report,
            &self.config.report_schema.headings,
        );
        let mut session = self
            .engine
            .open_session(&system_instruction(&self.config), &tools)
            .await
            .map_err(|e| OrchestratorError::Engine(e.to_string()))?;
        info!("Session started with {} tools", tools.len());

        let mut message = EngineMessage::User(input.to_string());
        for turn in 1..=self.config.max_turns {
            if cancel.is_cancelled() {
                return Ok(cancelled(&mut state));
            }

            state.push_turn(Turn::from(&message));
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(cancelled(&mut state)),
                reply = session.send(message) => {
                    reply.map_err(|e| OrchestratorError::Engine(e.to_string()))?
                }
            };
            state.push_turn(Turn::from(&response));
            debug!("Turn {}: {} tool call(s)", turn, response.tool_calls.len());

            if response.tool_calls.is_empty() {
                state.terminate();
                if !self.config.structured_report {
                    if let Some(text) = response.text.filter(|t| !t.trim().is_empty()) {
                        info!("Session finished after {} turn(s) with a plain-text report", turn);
                        return Ok(SessionResult {
                            outcome: SessionOutcome::Unstructured(text),
                            summary: SessionSummary::new(session_id, &state),
                        });
                    }
                }
                warn!("Engine stopped calling tools without a report");
                return Err(OrchestratorError::Exhausted(ExhaustionReason::NoToolCalls));
            }

            let planned = match self.plan_batch(&mut state, &response.tool_calls) {
                Batch::Accepted(report) => {
                    state.terminate();
                    info!("Report accepted after {} turn(s)", turn);
                    return Ok(SessionResult {
                        outcome: SessionOutcome::Accepted(report),
                        summary: SessionSummary::new(session_id, &state),
                    });
                }
                Batch::Run(planned) => planned,
            };

            let executed = self.execute_batch(planned).await;
            if !self.fold(&mut state, &executed) {
                state.terminate();
                warn!("No tool call in turn {} produced a result", turn);
                return Err(OrchestratorError::Exhausted(ExhaustionReason::NoResults));
            }

            let results = executed
                .into_iter()
                .map(|e| self.truncate(e.response))
                .collect();
            message = EngineMessage::ToolResults(results);

            if cancel.is_cancelled() {
                return Ok(cancelled(&mut state));
            }
        }

        state.terminate();
        warn!("Turn limit of {} reached", self.config.max_turns);
        Err(OrchestratorError::Exhausted(ExhaustionReason::MaxTurns(
            self.config.max_turns,
        )))
    }

    /// Serial pass over a batch: everything that needs the session state
    fn plan_batch(&self, state: &mut ConversationState, calls: &[ToolInvocation]) -> Batch {
        let mut planned = Vec::with_capacity(calls.len());

        for invocation in calls {
            let call = match ToolCall::parse(invocation) {
                Ok(call) => call,
                Err(e) => {
                    warn!("Rejected tool call {}: {}", invocation.name, e);
                    let kind = ToolKind::from_name(&invocation.name);
                    planned.push(Planned::Ready(Executed::failed(kind, &invocation.name, &e)));
                    continue;
                }
            };
            let kind = call.kind();
            let name = kind.name();

            if kind == ToolKind::EmitReport && !self.config.structured_report {
                let err = ToolError::Validation(format!("Unknown tool '{}'", name));
                planned.push(Planned::Ready(Executed::failed(Some(kind), name, &err)));
                continue;
            }

            if state.is_disabled(kind) {
                debug!("{} is disabled", name);
                let response = ToolResponse::error(
                    name,
                    format!(
                        "ToolUnavailable: {} is unavailable for the rest of this session (missing credential)",
                        name
                    ),
                );
                planned.push(Planned::Ready(Executed::immediate(Some(kind), response, false)));
                continue;
            }

            if let ToolCall::EmitReport(draft) = &call {
                let context = ReportContext::new(state.primary_source_found(), state.popular_coverage());
                let result = match draft {
                    ReportDraft::Sections(sections) => self.validator.validate(sections, &context),
                    ReportDraft::Text(text) => self.validator.validate_text(text, &context),
                };
                if let Some(report) = result.report.clone().filter(|_| result.is_accepted()) {
                    if calls.len() > 1 {
                        info!(
                            "Report accepted; {} other call(s) in the batch were not executed",
                            calls.len() - 1
                        );
                    }
                    return Batch::Accepted(report);
                }
                warn!("{}", result.feedback());
                let err = ToolError::Validation(result.feedback());
                planned.push(Planned::Ready(Executed::failed(Some(kind), name, &err)));
                continue;
            }

            if let Some(url) = call.url() {
                if !state.visit(url) {
                    info!("Skipping already visited URL {}", url);
                    let response = ToolResponse::ok(
                        name,
                        format!(
                            "Already visited {}; skipped. See the earlier result for this URL, \
                             whether it succeeded or failed.",
                            url
                        ),
                    );
                    planned.push(Planned::Ready(Executed::immediate(Some(kind), response, true)));
                    continue;
                }
            }

            info!("Tool call {}", call.summary());
            planned.push(Planned::Run(call));
        }

        Batch::Run(planned)
    }

    /// Run a batch with bounded concurrency, results in request order
    async fn execute_batch(&self, planned: Vec<Planned>) -> Vec<Executed> {
        stream::iter(planned)
            .map(|planned| async move {
                match planned {
                    Planned::Ready(done) => done,
                    Planned::Run(call) => self.execute(call).await,
                }
            })
            .buffered(self.config.max_concurrent_tools)
            .collect()
            .await
    }

    async fn execute(&self, call: ToolCall) -> Executed {
        let kind = call.kind();
        let name = kind.name();
        let timeout = self.config.timeout_for(kind);

        let outcome = match tokio::time::timeout(timeout, self.run_tool(call)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ToolError::Network(format!(
                "{} timed out after {}s",
                name,
                timeout.as_secs()
            ))),
        };

        match outcome {
            Ok(output) => Executed {
                kind: Some(kind),
                response: ToolResponse::ok(name, output.content),
                produced: output.produced,
                reached_provider: true,
                credential_failure: false,
                read: output.read,
                seen: output.seen,
            },
            Err(err) => {
                warn!("{} failed: {}", name, err);
                let mut executed = Executed::failed(Some(kind), name, &err);
                executed.reached_provider = true;
                executed.credential_failure = !err.is_recoverable();
                executed
            }
        }
    }

    async fn run_tool(&self, call: ToolCall) -> Result<ToolOutput, ToolError> {
        match call {
            ToolCall::SearchWeb { query } => {
                let hits = self
                    .tools
                    .search
                    .search(&query, self.config.search_max_results)
                    .await?;
                if hits.is_empty() {
                    let mut output = ToolOutput::new(format!("No results found for \"{}\".", query));
                    output.produced = false;
                    return Ok(output);
                }
                let content = hits
                    .iter()
                    .enumerate()
                    .map(|(i, hit)| format!("{}. {}\n   {}\n   {}", i + 1, hit.title, hit.url, hit.snippet))
                    .collect::<Vec<_>>()
                    .join("\n");
                let mut output = ToolOutput::new(content);
                output.seen = hits.into_iter().map(|hit| hit.url).collect();
                Ok(output)
            }
            ToolCall::ReadWebPage { url } => {
                let page = self.tools.fetcher.fetch(&url).await?;
                let content = format!(
                    "Title: {}\nURL: {}\n\n{}",
                    page.title.as_deref().unwrap_or("(untitled)"),
                    page.url,
                    page.text
                );
                let mut output = ToolOutput::new(content);
                output.read.push(url);
                Ok(output)
            }
            ToolCall::ReadPdf { url } => {
                let document = self
                    .tools
                    .documents
                    .extract(&DocumentSource::Url(url.clone()))
                    .await?;
                let content = format!(
                    "Read {} characters from {} pages of {}\n\n{}",
                    document.char_count, document.page_count, url, document.text
                );
                let mut output = ToolOutput::new(content);
                output.read.push(url);
                Ok(output)
            }
            ToolCall::FactCheck { statement } => {
                let category = self
                    .tools
                    .analyzer
                    .extractor()
                    .classify(&statement)
                    .unwrap_or(ClaimCategory::Factual);
                let depth = self.tools.gatherer.config().search_depth;
                let result = self
                    .tools
                    .gatherer
                    .gather(Claim::new(&statement, category), depth)
                    .await
                    .map_err(|e| e.as_tool_error())?;
                let content = serde_json::to_string_pretty(&result)
                    .map_err(|e| ToolError::Parse(e.to_string()))?;
                let mut output = ToolOutput::new(content);
                collect_evidence_urls(&mut output, std::slice::from_ref(&result));
                Ok(output)
            }
            ToolCall::AnalyzeDocument { url, max_claims } => {
                let max_claims = max_claims.unwrap_or(self.config.analyze_max_claims);
                let report = self
                    .tools
                    .analyzer
                    .analyze_document(&DocumentSource::Url(url.clone()), max_claims)
                    .await
                    .map_err(|e| e.as_tool_error())?;
                let mut output = ToolOutput::new(report.to_string());
                output.read.push(url);
                collect_evidence_urls(&mut output, report.evidence());
                Ok(output)
            }
            ToolCall::EmitReport(_) => Err(ToolError::Validation(
                "emit_report is validated before execution".to_string(),
            )),
        }
    }

    /// Fold a finished batch into the state; false if nothing produced a result
    fn fold(&self, state: &mut ConversationState, executed: &[Executed]) -> bool {
        let policy = self.validator.policy();
        for e in executed {
            if e.reached_provider {
                state.count_tool_call();
            }
            for url in &e.read {
                let primary = policy.is_primary(url);
                if primary {
                    info!("Primary source read: {}", url);
                }
                state.record_source(url, primary);
            }
            for url in &e.seen {
                if !policy.is_primary(url) {
                    state.record_coverage(url);
                }
            }
            if let (true, Some(kind)) = (e.credential_failure, e.kind) {
                warn!("Disabling {} for the rest of the session", kind);
                state.disable(kind);
            }
        }
        executed.iter().any(|e| e.produced)
    }

    fn truncate(&self, mut response: ToolResponse) -> ToolResponse {
        let max = self.config.max_tool_result_chars;
        if response.content.chars().count() > max {
            let mut cut: String = response.content.chars().take(max).collect();
            cut.push_str("\n[truncated]");
            response.content = cut;
        }
        response
    }
}

/// Examined corpus documents were read in full; web hits were only seen
fn collect_evidence_urls(output: &mut ToolOutput, evidence: &[EvidenceResult]) {
    for result in evidence {
        output
            .seen
            .extend(result.web_hits.iter().map(|hit| hit.url.clone()));
        output.read.extend(
            result
                .corpus_hits
                .iter()
                .filter(|hit| hit.match_type != MatchType::Unexamined)
                .filter_map(|hit| hit.url.clone()),
        );
    }
}
