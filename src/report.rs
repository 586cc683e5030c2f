//! Console report and output orchestration.
//!
//! [`write_reports`] renders the summary to the given writer, then writes
//! the results table and the plot image. The three outputs are independent:
//! a failure in one is logged and the others still run.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tweet_sentiment_core::{LabeledRecord, Sentiment, SummaryResult, TOP_K};

use crate::config::OutputConfig;
use crate::{export, plot};

/// Format of the console summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What the report is about.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Source label, e.g. `file:sample_tweets.csv`.
    pub source_label: &'a str,
    /// Search topic, for the network source.
    pub topic: Option<&'a str>,
}

impl ReportContext<'_> {
    /// Title of the distribution plot.
    pub fn plot_title(&self) -> String {
        match self.topic {
            Some(topic) => format!("Sentiment Distribution for Tweets about '{}'", topic),
            None => format!("Sentiment Distribution of {}", self.source_label),
        }
    }
}

/// Paths written by [`write_reports`]. `None` means disabled or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFiles {
    pub table: Option<PathBuf>,
    pub plot: Option<PathBuf>,
}

/// Render the human-readable summary.
pub fn render_summary(summary: &SummaryResult, ctx: &ReportContext) -> String {
    let counts = summary.counts();
    let mut out = String::new();

    out.push_str("\nAnalysis Results:\n");
    match ctx.topic {
        Some(topic) => out.push_str(&format!("Topic: {}\n", topic)),
        None => out.push_str(&format!("Source: {}\n", ctx.source_label)),
    }
    out.push_str(&format!("Total tweets analyzed: {}\n", summary.total_count()));
    out.push_str(&format!(
        "Average sentiment score: {:.3}\n",
        summary.average_sentiment()
    ));

    out.push_str("\nSentiment Distribution:\n");
    for sentiment in Sentiment::ALL {
        out.push_str(&format!(
            "{} tweets: {} ({:.1}%)\n",
            sentiment,
            counts.get(sentiment),
            counts.percentage(sentiment)
        ));
    }

    out.push_str(&format!("\nTop {} Most Positive Tweets:\n", TOP_K));
    push_ranked(&mut out, &summary.top_positive(TOP_K));

    out.push_str(&format!("\nTop {} Most Negative Tweets:\n", TOP_K));
    push_ranked(&mut out, &summary.top_negative(TOP_K));

    out
}

fn push_ranked(out: &mut String, records: &[&LabeledRecord]) {
    for record in records {
        out.push_str(&format!("\nTweet: {}\n", record.text()));
        out.push_str(&format!("Sentiment Score: {:.3}\n", record.compound()));
    }
}

#[derive(Serialize)]
struct JsonRanked<'a> {
    index: usize,
    text: &'a str,
    compound: f64,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
    total_count: usize,
    average_sentiment: f64,
    counts: tweet_sentiment_core::CategoryCounts,
    percentages: JsonPercentages,
    top_positive: Vec<JsonRanked<'a>>,
    top_negative: Vec<JsonRanked<'a>>,
}

#[derive(Serialize)]
struct JsonPercentages {
    positive: f64,
    neutral: f64,
    negative: f64,
}

fn ranked_json<'a>(records: Vec<&'a LabeledRecord>) -> Vec<JsonRanked<'a>> {
    records
        .into_iter()
        .map(|r| JsonRanked {
            index: r.index,
            text: r.text(),
            compound: r.compound(),
        })
        .collect()
}

/// Render the summary as pretty-printed JSON.
pub fn render_summary_json(summary: &SummaryResult, ctx: &ReportContext) -> Result<String> {
    let counts = summary.counts();
    let data = JsonSummary {
        source: ctx.source_label,
        topic: ctx.topic,
        total_count: summary.total_count(),
        average_sentiment: summary.average_sentiment(),
        counts,
        percentages: JsonPercentages {
            positive: counts.percentage(Sentiment::Positive),
            neutral: counts.percentage(Sentiment::Neutral),
            negative: counts.percentage(Sentiment::Negative),
        },
        top_positive: ranked_json(summary.top_positive(TOP_K)),
        top_negative: ranked_json(summary.top_negative(TOP_K)),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}

/// Timestamp embedded in output file names (`YYYYmmdd_HHMMSS`, local time).
pub fn run_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Emit the console summary, the results table, and the plot.
///
/// Each step is best-effort. Failures are logged at ERROR and do not
/// prevent the remaining steps.
pub fn write_reports<W: Write>(
    out: &mut W,
    summary: &SummaryResult,
    ctx: &ReportContext,
    format: OutputFormat,
    output: &OutputConfig,
    timestamp: &str,
) -> ReportFiles {
    if let Err(e) = print_summary(out, summary, ctx, format) {
        tracing::error!("Failed to print summary: {:#}", e);
    }

    let table = if output.write_table {
        match export::write_results_table(summary, &output.dir, timestamp) {
            Ok(path) => {
                tracing::info!("Detailed results saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::error!("Failed to write results table: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    let plot = if output.write_plots {
        match plot::write_plots(summary, &ctx.plot_title(), &output.dir, timestamp) {
            Ok(path) => {
                tracing::info!("Plots saved as {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::error!("Failed to write plots: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    ReportFiles { table, plot }
}

fn print_summary<W: Write>(
    out: &mut W,
    summary: &SummaryResult,
    ctx: &ReportContext,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", render_summary(summary, ctx))?,
        OutputFormat::Json => writeln!(out, "{}", render_summary_json(summary, ctx)?)?,
    }
    out.flush()?;
    Ok(())
}

/// Create `dir` if needed and return `dir/name`.
pub(crate) fn output_path(dir: &Path, name: &str) -> Result<PathBuf> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(dir.join(name))
}
