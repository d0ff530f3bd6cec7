//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `config_path` is the `--config` flag, if given.
pub fn execute_config(
    args: ConfigArgs,
    config_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let path = Config::resolve_path(config_path)?;
    match args.action {
        ConfigAction::Init { force } => {
            init(&path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
        ConfigAction::Show => {
            let config = Config::load(config_path)?;
            print!("{}", config.redacted().to_toml()?);
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("veracity").join("config.toml");

        init(&path, false).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[session]\nmax_turns = 3\n").unwrap();

        assert!(init(&path, false).is_err());
        assert!(fs::read_to_string(&path).unwrap().contains("max_turns = 3"));

        init(&path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
