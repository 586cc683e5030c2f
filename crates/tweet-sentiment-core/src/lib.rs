//! # Tweet Sentiment Core
//!
//! Pure, I/O-free logic for tweet-sentiment: the data model, the
//! threshold classifier, the [`Scorer`](scorer::Scorer) trait, the
//! aggregator that reduces scored texts into a summary, and histogram
//! binning for the distribution plot.
//!
//! This crate has no network, filesystem, or logging dependencies. Source
//! adapters, the VADER-backed scorer, and the reporter live in the
//! `tweet-sentiment` app crate.
//!
//! ```text
//! RawText ──▶ Scorer ──▶ classify ──▶ aggregate ──▶ Analysis
//!                                                  ├─ Summary(SummaryResult)
//!                                                  └─ Empty
//! ```

pub mod aggregate;
pub mod classify;
pub mod histogram;
pub mod models;
pub mod scorer;

pub use aggregate::{aggregate, aggregate_with_failures, summarize, AggregateReport, TOP_K};
pub use classify::{classify, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
pub use histogram::{histogram, HistogramBin, HISTOGRAM_BINS};
pub use models::{Analysis, CategoryCounts, LabeledRecord, RawText, ScoreRecord, Sentiment, SummaryResult};
pub use scorer::{score_all, ScoreError, ScoreOutcome, Scorer};
