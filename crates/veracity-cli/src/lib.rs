//! Veracity CLI library.
//!
//! Configuration loading, provider wiring, command execution and output
//! formatting for the `veracity` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod setup;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
