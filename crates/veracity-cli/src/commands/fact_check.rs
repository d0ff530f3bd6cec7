//! Fact-check command implementation.

use crate::cli::FactCheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::setup;
use veracity_domain::{Claim, ClaimCategory};
use veracity_extractor::ClaimExtractor;

/// Execute the fact-check command.
pub async fn execute_fact_check(
    args: FactCheckArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let statement = args.statement_text();
    if statement.trim().is_empty() {
        return Err(CliError::InvalidInput("Statement must not be empty".to_string()));
    }
    let depth = args.depth.unwrap_or(config.evidence.search_depth);
    if depth == 0 {
        return Err(CliError::InvalidInput("--depth must be at least 1".to_string()));
    }

    let extractor = ClaimExtractor::new(config.extractor.clone())?;
    let claim = Claim::new(&statement, category_of(&extractor, &statement));

    let gatherer = setup::gatherer(config)?;
    let result = gatherer.gather(claim, depth).await?;
    println!("{}", formatter.evidence(&result)?);
    Ok(())
}

/// Statements that match no category are checked as factual claims
fn category_of(extractor: &ClaimExtractor, statement: &str) -> ClaimCategory {
    extractor.classify(statement).unwrap_or(ClaimCategory::Factual)
}
