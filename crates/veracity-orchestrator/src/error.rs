//! Orchestrator error types

use std::fmt;
use thiserror::Error;

/// Why a session ended without a validated report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionReason {
    /// The turn limit was reached
    MaxTurns(usize),

    /// The engine replied without tool calls while a structured report was required
    NoToolCalls,

    /// No tool call in the last batch produced a result
    NoResults,
}

impl fmt::Display for ExhaustionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhaustionReason::MaxTurns(n) => write!(f, "reached the limit of {} turns", n),
            ExhaustionReason::NoToolCalls => {
                write!(f, "the engine stopped calling tools without emitting a report")
            }
            ExhaustionReason::NoResults => {
                write!(f, "no tool call in the last batch produced a result")
            }
        }
    }
}

/// Errors that end a verification session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// The session ran out of turns or progress
    #[error("Could not produce a validated report: {0}")]
    Exhausted(ExhaustionReason),

    /// The reasoning engine failed
    #[error("Reasoning engine error: {0}")]
    Engine(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_message() {
        let err = OrchestratorError::Exhausted(ExhaustionReason::MaxTurns(12));
        assert_eq!(
            err.to_string(),
            "Could not produce a validated report: reached the limit of 12 turns"
        );
    }
}
