//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veracity - verify claims and documents against primary sources.
#[derive(Debug, Parser)]
#[command(name = "veracity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VERACITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a claim with a reasoning engine and the research tools
    Check(CheckArgs),

    /// Analyze a PDF document: extract claims, fact-check, score
    Analyze(AnalyzeArgs),

    /// Gather evidence for a single statement
    FactCheck(FactCheckArgs),

    /// Extract and classify claims from a text or PDF file (offline)
    Extract(ExtractArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// The claim to verify
    #[arg(required = true, num_args = 1..)]
    pub claim: Vec<String>,

    /// Override the turn limit
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Accept a plain-text reply instead of requiring `emit_report`
    #[arg(long)]
    pub unstructured: bool,

    /// Engine model override
    #[arg(short, long)]
    pub model: Option<String>,
}

impl CheckArgs {
    /// The claim words joined into one statement
    pub fn claim_text(&self) -> String {
        self.claim.join(" ")
    }
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// PDF path or URL
    pub source: String,

    /// Maximum number of claims to fact-check
    #[arg(long, default_value = "5")]
    pub claims: usize,
}

/// Arguments for the fact-check command.
#[derive(Debug, Parser)]
pub struct FactCheckArgs {
    /// The statement to check
    #[arg(required = true, num_args = 1..)]
    pub statement: Vec<String>,

    /// Corpus candidates to examine
    #[arg(short, long)]
    pub depth: Option<usize>,
}

impl FactCheckArgs {
    /// The statement words joined into one statement
    pub fn statement_text(&self) -> String {
        self.statement.join(" ")
    }
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text or PDF file
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration (API keys redacted)
    Show,

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::output::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::output::OutputFormat::Text,
            CliFormat::Json => crate::output::OutputFormat::Json,
        }
    }
}
