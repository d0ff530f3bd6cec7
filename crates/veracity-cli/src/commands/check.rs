//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::setup;
use tokio_util::sync::CancellationToken;
use tracing::info;
use veracity_orchestrator::SessionConfig;

/// Execute the check command.
///
/// Ctrl+C cancels the session at the next turn boundary.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let claim = args.claim_text();
    if claim.trim().is_empty() {
        return Err(CliError::InvalidInput("Claim must not be empty".to_string()));
    }

    let session = session_config(&args, &config.session);
    let orchestrator = setup::orchestrator(config, session)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, cancelling session");
            on_interrupt.cancel();
        }
    });

    let result = orchestrator.verify_with_cancel(&claim, cancel).await;
    watcher.abort();

    println!("{}", formatter.session(&result?)?);
    Ok(())
}

/// Apply command-line overrides to the configured session settings
fn session_config(args: &CheckArgs, base: &SessionConfig) -> SessionConfig {
    let mut session = base.clone();
    if let Some(max_turns) = args.max_turns {
        session.max_turns = max_turns;
    }
    if args.unstructured {
        session.structured_report = false;
    }
    if let Some(model) = &args.model {
        session.model = Some(model.clone());
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = CheckArgs {
            claim: vec!["claim".to_string()],
            max_turns: Some(4),
            unstructured: true,
            model: Some("gemini-2.5-pro".to_string()),
        };
        let session = session_config(&args, &SessionConfig::default());
        assert_eq!(session.max_turns, 4);
        assert!(!session.structured_report);
        assert_eq!(session.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(session.tool_timeout_secs, 30);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let args = CheckArgs {
            claim: vec!["claim".to_string()],
            max_turns: None,
            unstructured: false,
            model: None,
        };
        let base = SessionConfig::thorough();
        assert_eq!(session_config(&args, &base), base);
    }
}
