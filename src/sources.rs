//! Source health listing for `tsa sources`.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::config::Config;
use crate::connector_twitter::TwitterCredentials;
use crate::report::OutputFormat;

/// Configuration and health of one source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub name: String,
    pub source_type: String,
    pub status: String,
    pub healthy: bool,
}

/// Check every built-in source against `config` and the environment.
pub fn get_sources(config: &Config) -> Vec<SourceStatus> {
    get_sources_with(config, &TwitterCredentials::missing_from_env())
}

fn get_sources_with(config: &Config, missing_credentials: &[&str]) -> Vec<SourceStatus> {
    let file = &config.sources.file;
    let (file_status, file_ok) = if file.path.is_file() {
        ("OK".to_string(), true)
    } else {
        (format!("MISSING ({})", file.path.display()), false)
    };

    let (twitter_status, twitter_ok) = if missing_credentials.is_empty() {
        ("OK".to_string(), true)
    } else {
        (format!("NOT CONFIGURED ({})", missing_credentials.join(", ")), false)
    };

    vec![
        SourceStatus {
            name: file.path.display().to_string(),
            source_type: "file".to_string(),
            status: file_status,
            healthy: file_ok,
        },
        SourceStatus {
            name: "search".to_string(),
            source_type: "twitter".to_string(),
            status: twitter_status,
            healthy: twitter_ok,
        },
    ]
}

/// Print the source table (or JSON) to `out`.
pub fn list_sources<W: Write>(config: &Config, format: OutputFormat, out: &mut W) -> Result<()> {
    let sources = get_sources(config);
    write_sources(&sources, format, out)
}

fn write_sources<W: Write>(sources: &[SourceStatus], format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(sources)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{:<10} {:<24} {:<8} STATUS", "TYPE", "NAME", "HEALTHY")?;
            for s in sources {
                writeln!(
                    out,
                    "{:<10} {:<24} {:<8} {}",
                    s.source_type, s.name, s.healthy, s.status
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_and_credentials() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.sources.file.path = tmp.path().join("absent.csv");

        let sources = get_sources_with(&config, &["TWITTER_ACCESS_TOKEN"]);
        assert_eq!(sources.len(), 2);
        assert!(!sources[0].healthy);
        assert!(sources[0].status.starts_with("MISSING"));
        assert!(!sources[1].healthy);
        assert_eq!(sources[1].status, "NOT CONFIGURED (TWITTER_ACCESS_TOKEN)");
    }

    #[test]
    fn test_healthy_sources() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tweets.csv");
        std::fs::write(&path, "tweet_text\nhi\n").unwrap();
        let mut config = Config::default();
        config.sources.file.path = path;

        let sources = get_sources_with(&config, &[]);
        assert!(sources.iter().all(|s| s.healthy));

        let mut buf = Vec::new();
        write_sources(&sources, OutputFormat::Text, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("TYPE"));
        assert!(text.contains("twitter"));
    }
}
