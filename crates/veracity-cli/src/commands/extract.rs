//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use veracity_extractor::{ClaimExtractor, ConnectionAnalyzer};
use veracity_providers::extract_pdf_text;

/// Execute the extract command.
///
/// Runs entirely offline: no search, no fetch, no engine.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args.file)?;

    let extractor = ClaimExtractor::new(config.extractor.clone())?;
    let extracted = extractor.extract(&text)?;
    let connections = ConnectionAnalyzer::new(config.extractor.clone()).analyze(&extracted.claims);

    println!("{}", formatter.extraction(&extracted, &connections)?);
    Ok(())
}

/// Read a text file, or the text layer of a PDF
fn read_text(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Ok(fs::read_to_string(path)?);
    }

    let bytes = fs::read(path)?;
    let document = extract_pdf_text(&bytes).map_err(|e| {
        CliError::InvalidInput(format!("Could not read {}: {}", path.display(), e))
    })?;
    Ok(document.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_plain_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "Studies show 75% of users prefer X.").unwrap();
        assert_eq!(read_text(&path).unwrap(), "Studies show 75% of users prefer X.");
    }

    #[test]
    fn test_unreadable_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.PDF");
        fs::write(&path, b"not a pdf").unwrap();
        assert!(matches!(read_text(&path), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_text(&dir.path().join("absent.txt")),
            Err(CliError::Io(_))
        ));
    }
}
