//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::setup;
use veracity_domain::DocumentSource;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.claims == 0 {
        return Err(CliError::InvalidInput("--claims must be at least 1".to_string()));
    }
    let source = DocumentSource::parse(&args.source);
    if let DocumentSource::Path(path) = &source {
        if !path.exists() {
            return Err(CliError::InvalidInput(format!(
                "File not found: {}",
                path.display()
            )));
        }
    }

    let analyzer = setup::analyzer(config)?;
    let report = analyzer.analyze_document(&source, args.claims).await?;
    println!("{}", formatter.veracity_report(&report)?);
    Ok(())
}
