//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while building a validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A policy pattern failed to compile
    #[error("Policy error: {0}")]
    Policy(String),
}

impl From<regex::Error> for GatekeeperError {
    fn from(err: regex::Error) -> Self {
        GatekeeperError::Policy(err.to_string())
    }
}
