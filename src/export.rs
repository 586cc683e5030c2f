//! Export the scored records as a CSV table.
//!
//! One row per surviving record, in source order:
//!
//! ```text
//! tweet,compound_score,pos_score,neg_score,neu_score,sentiment
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tweet_sentiment_core::SummaryResult;

use crate::report::output_path;

#[derive(Serialize)]
struct ResultRow<'a> {
    tweet: &'a str,
    compound_score: f64,
    pos_score: f64,
    neg_score: f64,
    neu_score: f64,
    sentiment: &'static str,
}

/// File name of the results table for a run.
pub fn results_table_name(timestamp: &str) -> String {
    format!("sentiment_analysis_results_{}.csv", timestamp)
}

/// Write the results table into `dir` and return its path.
pub fn write_results_table(summary: &SummaryResult, dir: &Path, timestamp: &str) -> Result<PathBuf> {
    let path = output_path(dir, &results_table_name(timestamp))
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for record in summary.records() {
        writer.serialize(ResultRow {
            tweet: record.text(),
            compound_score: record.record.compound,
            pos_score: record.record.pos,
            neg_score: record.record.neg,
            neu_score: record.record.neu,
            sentiment: record.sentiment.as_str(),
        })?;
    }
    writer.flush()?;

    Ok(path)
}
