//! CSV file source.
//!
//! Reads one text per data row from a named column of a CSV file with a
//! header row. The file and the column must exist; either missing aborts
//! the run. A row without a value in the column yields an empty text,
//! which the scorer rejects and the pipeline skips.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tweet_sentiment_core::RawText;

use crate::config::FileSourceConfig;
use crate::traits::Source;

/// A CSV file source implementing [`Source`].
pub struct FileSource {
    /// File name, used as the instance name.
    name: String,
    path: PathBuf,
    column: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            column: column.into(),
        }
    }

    pub fn from_config(config: &FileSourceConfig) -> Self {
        Self::new(config.path.clone(), config.column.clone())
    }
}

impl Source for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Read texts from a column of a local CSV file"
    }

    fn source_type(&self) -> &str {
        "file"
    }

    fn fetch(&self) -> Result<Vec<RawText>> {
        read_text_column(&self.path, &self.column)
    }
}

/// Read every value of `column` from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed, or if no header
/// is named `column`.
pub fn read_text_column(path: &Path, column: &str) -> Result<Vec<RawText>> {
    if !path.exists() {
        bail!("Input file does not exist: {}", path.display());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = reader
        .byte_headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .clone();

    let position = headers
        .iter()
        .position(|h| String::from_utf8_lossy(h).trim_start_matches('\u{feff}') == column);

    let position = match position {
        Some(p) => p,
        None => {
            let available: Vec<String> = headers
                .iter()
                .map(|h| String::from_utf8_lossy(h).to_string())
                .collect();
            bail!(
                "Column '{}' not found in {}. Available columns: {}",
                column,
                path.display(),
                available.join(", ")
            );
        }
    };

    let mut texts = Vec::new();
    for (index, row) in reader.byte_records().enumerate() {
        let row = row.with_context(|| {
            format!("Failed to read row {} of {}", index + 1, path.display())
        })?;
        let text = row
            .get(position)
            .map(|cell| String::from_utf8_lossy(cell).to_string())
            .unwrap_or_default();
        texts.push(RawText::new(index, text));
    }

    Ok(texts)
}
