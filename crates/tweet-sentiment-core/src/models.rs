//! Core data models used throughout tweet-sentiment.
//!
//! These types represent the texts, scores, and summaries that flow through
//! the scoring and aggregation pipeline. Records are immutable once built;
//! a [`SummaryResult`] can only be produced by the aggregator.

use serde::Serialize;
use std::fmt;

/// A single text produced by a source adapter, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    /// 0-based position in the source sequence.
    pub index: usize,
    pub text: String,
}

impl RawText {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// The four scores a lexicon model assigns to one text.
///
/// `compound` lies in `[-1.0, 1.0]`; `pos`, `neg`, and `neu` lie in
/// `[0.0, 1.0]` and sum to roughly one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub text: String,
    pub compound: f64,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

/// Categorical sentiment derived from a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All categories in report order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored text with its derived category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRecord {
    /// Position of the text in the source sequence.
    pub index: usize,
    #[serde(flatten)]
    pub record: ScoreRecord,
    pub sentiment: Sentiment,
}

impl LabeledRecord {
    pub fn text(&self) -> &str {
        &self.record.text
    }

    pub fn compound(&self) -> f64 {
        self.record.compound
    }
}

/// Per-category record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    /// Share of `sentiment` in percent. Returns `0.0` when there are no records.
    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(sentiment) as f64 / total as f64 * 100.0
    }
}

/// Aggregate statistics and the full record list for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub(crate) average_sentiment: f64,
    pub(crate) total_count: usize,
    pub(crate) counts: CategoryCounts,
    pub(crate) records: Vec<LabeledRecord>,
}

impl SummaryResult {
    /// Arithmetic mean of every record's compound score.
    pub fn average_sentiment(&self) -> f64 {
        self.average_sentiment
    }

    /// Number of texts that scored successfully.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn counts(&self) -> CategoryCounts {
        self.counts
    }

    /// Surviving records in source order.
    pub fn records(&self) -> &[LabeledRecord] {
        &self.records
    }

    /// Compound scores in source order.
    pub fn compound_scores(&self) -> Vec<f64> {
        self.records.iter().map(LabeledRecord::compound).collect()
    }
}

/// Outcome of one analysis run.
///
/// `Empty` is a defined alternate result, not an error: no text survived
/// scoring, so there is nothing to report.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Summary(SummaryResult),
    Empty,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        matches!(self, Analysis::Empty)
    }

    pub fn summary(&self) -> Option<&SummaryResult> {
        match self {
            Analysis::Summary(summary) => Some(summary),
            Analysis::Empty => None,
        }
    }

    pub fn into_summary(self) -> Option<SummaryResult> {
        match self {
            Analysis::Summary(summary) => Some(summary),
            Analysis::Empty => None,
        }
    }
}
