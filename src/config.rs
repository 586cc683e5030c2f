//! TOML configuration.
//!
//! Every section is optional; missing values fall back to the defaults
//! below. The file is looked up at `--config <path>`, otherwise at
//! [`DEFAULT_CONFIG_PATH`] if it exists, otherwise the built-in defaults
//! apply.
//!
//! ```toml
//! [sources.file]
//! path = "sample_tweets.csv"
//! column = "tweet_text"
//!
//! [sources.twitter]
//! count = 100
//! page_size = 100
//! lang = "en"
//! api_base = "https://api.twitter.com"
//! timeout_secs = 30
//!
//! [output]
//! dir = "."
//! write_table = true
//! write_plots = true
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/tsa.toml";

/// Largest page the search endpoint serves.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourcesConfig {
    #[serde(default)]
    pub file: FileSourceConfig,
    #[serde(default)]
    pub twitter: TwitterSourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FileSourceConfig {
    #[serde(default = "default_file_path")]
    pub path: PathBuf,
    #[serde(default = "default_column")]
    pub column: String,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            path: default_file_path(),
            column: default_column(),
        }
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from("sample_tweets.csv")
}
fn default_column() -> String {
    "tweet_text".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TwitterSourceConfig {
    /// Total number of tweets to fetch.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Tweets requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TwitterSourceConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            page_size: default_page_size(),
            lang: default_lang(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_count() -> usize {
    100
}
fn default_page_size() -> usize {
    MAX_PAGE_SIZE
}
fn default_lang() -> String {
    "en".to_string()
}
fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_true")]
    pub write_table: bool,
    #[serde(default = "default_true")]
    pub write_plots: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            write_table: true,
            write_plots: true,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_true() -> bool {
    true
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Resolve the config for this run.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is used
/// when present and the built-in defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

impl Config {
    /// Check value ranges. Called after loading and after CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if self.sources.file.column.trim().is_empty() {
            anyhow::bail!("sources.file.column must not be empty");
        }

        let twitter = &self.sources.twitter;
        if twitter.count == 0 {
            anyhow::bail!("sources.twitter.count must be > 0");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&twitter.page_size) {
            anyhow::bail!("sources.twitter.page_size must be in [1, {}]", MAX_PAGE_SIZE);
        }
        if twitter.lang.trim().is_empty() {
            anyhow::bail!("sources.twitter.lang must not be empty");
        }
        if twitter.timeout_secs == 0 {
            anyhow::bail!("sources.twitter.timeout_secs must be > 0");
        }
        if !(twitter.api_base.starts_with("http://") || twitter.api_base.starts_with("https://")) {
            anyhow::bail!(
                "sources.twitter.api_base must be an http(s) URL, got '{}'",
                twitter.api_base
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sources.file.column, "tweet_text");
        assert_eq!(config.sources.twitter.count, 100);
        assert_eq!(config.sources.twitter.lang, "en");
        assert!(config.output.write_table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sources.twitter.page_size, 100);
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [sources.twitter]
            count = 250

            [output]
            write_plots = false
            "#,
        )
        .unwrap();
        assert_eq!(config.sources.twitter.count, 250);
        assert_eq!(config.sources.twitter.page_size, 100);
        assert!(!config.output.write_plots);
        assert!(config.output.write_table);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.sources.twitter.page_size = 101;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sources.twitter.count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sources.file.column = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sources.twitter.api_base = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tsa.toml");
        fs::write(
            &path,
            "[sources.file]\npath = \"tweets.csv\"\ncolumn = \"body\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.sources.file.path, PathBuf::from("tweets.csv"));
        assert_eq!(config.sources.file.column, "body");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
