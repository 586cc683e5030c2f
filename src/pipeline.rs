//! Analysis pipeline orchestration.
//!
//! Coordinates one run: source → scorer → aggregator → reporter. Fetching
//! is fatal on error; scoring skips bad items with a warning; reporting is
//! best-effort per output.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tweet_sentiment_core::{aggregate_with_failures, Analysis, ScoreOutcome, Scorer};

use crate::config::Config;
use crate::connector_file::FileSource;
use crate::connector_twitter::{TwitterCredentials, TwitterSource};
use crate::report::{self, OutputFormat, ReportContext, ReportFiles};
use crate::traits::Source;
use crate::vader::VaderScorer;

/// Characters of a text shown in debug logs.
const LOG_PREVIEW_CHARS: usize = 50;

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Reported(ReportFiles),
    /// Nothing survived scoring; no report was produced.
    Empty,
}

/// Fetch every text from `source` and aggregate the scores.
///
/// # Errors
///
/// Only a failed fetch is an error. Items that fail to score are logged at
/// WARN and dropped; if none survive the result is [`Analysis::Empty`].
pub fn analyze_source<S: Scorer + ?Sized>(source: &dyn Source, scorer: &S) -> Result<Analysis> {
    let label = source.source_label();
    tracing::info!("Reading texts from {}", label);

    let texts = source
        .fetch()
        .with_context(|| format!("Failed to fetch texts from {}", label))?;
    let fetched = texts.len();

    let aggregated = aggregate_with_failures(scorer, texts);

    for failure in &aggregated.failures {
        if let ScoreOutcome::Failed { index, error, .. } = failure {
            tracing::warn!(index, "Error analyzing tweet: {}", error);
        }
    }

    match &aggregated.analysis {
        Analysis::Summary(summary) => {
            for record in summary.records() {
                tracing::debug!(
                    "Tweet analyzed: {}... Score: {}",
                    preview(record.text()),
                    record.compound()
                );
            }
            tracing::info!(
                fetched,
                analyzed = summary.total_count(),
                skipped = aggregated.failures.len(),
                "Average Sentiment Score: {}",
                summary.average_sentiment()
            );
        }
        Analysis::Empty => {
            tracing::error!("No tweets were successfully analyzed");
        }
    }

    Ok(aggregated.analysis)
}

/// Analyse `source` and emit every report.
pub fn run_analysis<S, W>(
    config: &Config,
    source: &dyn Source,
    scorer: &S,
    topic: Option<&str>,
    format: OutputFormat,
    out: &mut W,
) -> Result<RunOutcome>
where
    S: Scorer + ?Sized,
    W: Write,
{
    let analysis = analyze_source(source, scorer)?;
    let summary = match analysis {
        Analysis::Summary(summary) => summary,
        Analysis::Empty => return Ok(RunOutcome::Empty),
    };

    let label = source.source_label();
    let ctx = ReportContext {
        source_label: &label,
        topic,
    };
    let timestamp = report::run_timestamp();
    let files = report::write_reports(out, &summary, &ctx, format, &config.output, &timestamp);
    Ok(RunOutcome::Reported(files))
}

/// Analyse the configured CSV file with VADER.
pub fn run_file<W: Write>(config: &Config, format: OutputFormat, out: &mut W) -> Result<RunOutcome> {
    let source = FileSource::from_config(&config.sources.file);
    let scorer = VaderScorer::new();
    run_analysis(config, &source, &scorer, None, format, out)
}

/// Search Twitter for `topic` and analyse the results with VADER.
pub fn run_search<W: Write>(
    config: &Config,
    topic: &str,
    credentials: TwitterCredentials,
    format: OutputFormat,
    out: &mut W,
) -> Result<RunOutcome> {
    tracing::info!("Fetching tweets about '{}'...", topic);
    let source = TwitterSource::new(topic, config.sources.twitter.clone(), credentials);
    let scorer = VaderScorer::new();
    run_analysis(config, &source, &scorer, Some(topic), format, out)
}

/// Ask for a search topic on `output` and read one line from `input`.
///
/// Returns `None` when the answer is blank.
pub fn prompt_topic<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Option<String>> {
    writeln!(output, "\nWelcome to Twitter Sentiment Analysis!")?;
    writeln!(
        output,
        "Enter a topic to analyze tweets about (e.g., 'artificial intelligence', 'climate change', 'sports'):"
    )?;
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read topic")?;
    let topic = line.trim();
    if topic.is_empty() {
        Ok(None)
    } else {
        Ok(Some(topic.to_string()))
    }
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}
