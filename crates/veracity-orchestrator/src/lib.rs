//! Veracity Orchestrator
//!
//! Runs a verification session: a reasoning engine plans tool calls, the
//! orchestrator executes them, and the session ends when the engine emits a
//! report that passes the gatekeeper.
//!
//! # Tools
//!
//! - `search_web` - general web search
//! - `read_web_page` - visible text of a page
//! - `read_pdf` - full text of a PDF
//! - `fact_check` - evidence for one statement
//! - `analyze_document` - full analysis of a document
//! - `emit_report` - submit the final report (structured mode only)
//!
//! # Guarantees
//!
//! - No URL is read twice in a session; repeats get a short sentinel result
//! - A report is only accepted after a primary source was read
//! - A tool whose credential is missing is disabled for the rest of the session
//! - Tool results are returned to the engine in request order
//! - The session always ends within `max_turns` engine replies
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use veracity_orchestrator::{Orchestrator, SessionConfig, SessionOutcome, Toolbox};
//! # async fn run(
//! #     engine: Arc<dyn veracity_domain::traits::ReasoningEngine>,
//! #     tools: Toolbox,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(engine, tools, SessionConfig::default())?;
//! let result = orchestrator.verify("Wind turbines kill more birds than cats").await?;
//! if let SessionOutcome::Accepted(report) = result.outcome {
//!     println!("{}", report);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod prompt;
mod session;
mod state;
mod tools;

pub use config::SessionConfig;
pub use error::{ExhaustionReason, OrchestratorError};
pub use prompt::system_instruction;
pub use session::{Orchestrator, SessionOutcome, SessionResult, SessionSummary, Toolbox};
pub use state::{normalize_url, ConversationState, Turn};
pub use tools::{declarations, ReportDraft, ToolCall, ToolKind};
