//! Configuration management for the CLI.
//!
//! One TOML file aggregates every component's settings:
//!
//! ```toml
//! [settings]
//! color = true
//! format = "text"
//!
//! [session]
//! max_turns = 12
//!
//! [evidence]
//! search_depth = 3
//!
//! [providers.gemini]
//! model = "gemini-2.0-flash"
//! ```

use crate::error::{CliError, Result};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use veracity_evidence::EvidenceConfig;
use veracity_extractor::ExtractorConfig;
use veracity_orchestrator::SessionConfig;
use veracity_providers::ProvidersConfig;

const REDACTED: &str = "********";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Presentation settings
    pub settings: Settings,

    /// Claim extraction
    pub extractor: ExtractorConfig,

    /// Evidence gathering
    pub evidence: EvidenceConfig,

    /// Verification sessions
    pub session: SessionConfig,

    /// Provider endpoints and credentials
    pub providers: ProvidersConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Could not find configuration directory".into()))?;
        Ok(dir.join("veracity").join("config.toml"))
    }

    /// Resolve the path to use: an explicit one, or the default.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; a missing default file yields the defaults.
    /// API keys absent from the file are taken from the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config.with_env_credentials())
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Could not read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every component's settings.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("extractor", self.extractor.validate()),
            ("evidence", self.evidence.validate()),
            ("session", self.session.validate()),
            ("providers", self.providers.validate()),
        ];
        for (section, check) in checks {
            check.map_err(|e| CliError::Config(format!("[{}] {}", section, e)))?;
        }
        Ok(())
    }

    /// Fill missing API keys from the environment.
    pub fn with_env_credentials(mut self) -> Self {
        self.providers = self.providers.with_env_credentials();
        self
    }

    /// Copy with API keys masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for key in [
            &mut config.providers.tavily.api_key,
            &mut config.providers.gemini.api_key,
        ] {
            if key.is_some() {
                *key = Some(REDACTED.to_string());
            }
        }
        config
    }
}
