//! # Tweet Sentiment
//!
//! Lexicon-based sentiment analysis over short social-media texts.
//!
//! Texts come from a source (a CSV file or a Twitter keyword search), are
//! scored with VADER, labelled Positive / Neutral / Negative, and summarised
//! into a console report, a per-record CSV table, and an SVG chart.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │   Sources   │──▶│   Scorer    │──▶│  Aggregate  │──▶│   Reports    │
//! │ file/twitter│   │   (VADER)   │   │ mean/top-k  │   │ text/csv/svg │
//! └─────────────┘   └─────────────┘   └─────────────┘   └──────────────┘
//! ```
//!
//! Classification, aggregation, and binning live in the
//! `tweet-sentiment-core` crate, which does no I/O.
//!
//! ## Quick Start
//!
//! ```bash
//! tsa file ./sample_tweets.csv          # analyse a CSV file
//! tsa search "climate change"           # analyse recent tweets
//! tsa sources                           # check source health
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`traits`] | The [`Source`](traits::Source) seam |
//! | [`connector_file`] | CSV file source |
//! | [`connector_twitter`] | Twitter search source (OAuth 1.0a) |
//! | [`vader`] | VADER-backed scorer |
//! | [`pipeline`] | One analysis run, source to reports |
//! | [`report`] | Console summary and output orchestration |
//! | [`export`] | Results table |
//! | [`plot`] | SVG histogram and pie chart |
//! | [`sources`] | Source health listing |
//! | [`telemetry`] | Tracing setup |

pub mod config;
pub mod connector_file;
pub mod connector_twitter;
pub mod export;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod sources;
pub mod telemetry;
pub mod traits;
pub mod vader;
