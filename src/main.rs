//! # Tweet Sentiment CLI (`tsa`)
//!
//! Scores short texts with VADER and reports the sentiment distribution.
//!
//! ## Usage
//!
//! ```bash
//! tsa --config ./config/tsa.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tsa file [PATH]` | Analyse a column of a CSV file |
//! | `tsa search [TOPIC]` | Analyse recent tweets about a topic |
//! | `tsa sources` | List sources and their health status |
//!
//! ## Exit status
//!
//! `0` when a report was produced, `1` on error (including a blank topic),
//! `2` when no text could be analysed.
//!
//! ## Examples
//!
//! ```bash
//! # Analyse the bundled sample
//! tsa file sample_tweets.csv
//!
//! # A different column, JSON summary on stdout
//! tsa file data.csv --column body --format json
//!
//! # Prompt for a topic, write outputs under ./out
//! tsa search --output-dir ./out
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tweet_sentiment::config::resolve_config;
use tweet_sentiment::connector_twitter::TwitterCredentials;
use tweet_sentiment::pipeline::{prompt_topic, run_file, run_search, RunOutcome};
use tweet_sentiment::report::OutputFormat;
use tweet_sentiment::sources::list_sources;
use tweet_sentiment::telemetry::init_tracing;

/// Exit status when nothing could be analysed.
const EXIT_EMPTY: u8 = 2;

/// Tweet Sentiment CLI: lexicon-based sentiment analysis of short texts.
///
/// Reads `./config/tsa.toml` when present. Twitter credentials are taken
/// from the environment (a `.env` file in the working directory is loaded
/// first).
#[derive(Parser)]
#[command(
    name = "tsa",
    about = "Tweet Sentiment: VADER sentiment analysis of CSV files and Twitter searches",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Without this flag `./config/tsa.toml` is used if it exists and the
    /// built-in defaults otherwise.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the results table and the plot image.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Console output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log line format (logs go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Log at DEBUG instead of INFO. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyse texts from a column of a CSV file.
    File {
        /// CSV file with a header row. Defaults to `sources.file.path`.
        path: Option<PathBuf>,

        /// Header of the text column. Defaults to `sources.file.column`.
        #[arg(long)]
        column: Option<String>,
    },

    /// Analyse recent tweets matching a keyword query.
    ///
    /// Requires TWITTER_CONSUMER_KEY, TWITTER_CONSUMER_SECRET,
    /// TWITTER_ACCESS_TOKEN and TWITTER_ACCESS_TOKEN_SECRET.
    Search {
        /// Search topic. Prompted for on stdin when omitted.
        topic: Option<String>,

        /// Maximum number of tweets to fetch.
        #[arg(long)]
        count: Option<usize>,
    },

    /// List sources and their health status.
    Sources,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_tracing(cli.log_format == LogFormat::Json, level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::File { path, column } => {
            if let Some(path) = path {
                config.sources.file.path = path;
            }
            if let Some(column) = column {
                config.sources.file.column = column;
            }
            config.validate()?;

            let outcome = run_file(&config, cli.format, &mut out)?;
            Ok(exit_code(&outcome))
        }
        Commands::Search { topic, count } => {
            if let Some(count) = count {
                config.sources.twitter.count = count;
            }
            config.validate()?;

            // Fail on credentials before asking for anything.
            let credentials = TwitterCredentials::from_env()?;

            let topic = match topic.map(|t| t.trim().to_string()) {
                Some(t) if !t.is_empty() => t,
                Some(_) => return Ok(blank_topic()),
                None => {
                    let stdin = io::stdin();
                    match prompt_topic(stdin.lock(), &mut out)? {
                        Some(t) => t,
                        None => return Ok(blank_topic()),
                    }
                }
            };

            let outcome = run_search(&config, &topic, credentials, cli.format, &mut out)?;
            Ok(exit_code(&outcome))
        }
        Commands::Sources => {
            config.validate()?;
            list_sources(&config, cli.format, &mut out)?;
            out.flush().context("Failed to write to stdout")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(outcome: &RunOutcome) -> ExitCode {
    match outcome {
        RunOutcome::Reported(_) => ExitCode::SUCCESS,
        RunOutcome::Empty => ExitCode::from(EXIT_EMPTY),
    }
}

fn blank_topic() -> ExitCode {
    eprintln!("Error: Please enter a topic to analyze");
    ExitCode::FAILURE
}
