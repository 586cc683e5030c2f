//! The source adapter seam.
//!
//! A [`Source`] produces the ordered sequence of raw texts that the
//! pipeline scores. Built-in sources are the CSV file reader
//! ([`FileSource`](crate::connector_file::FileSource)) and the Twitter
//! search client ([`TwitterSource`](crate::connector_twitter::TwitterSource)).
//! Custom sources implement the trait and go through the same pipeline.
//!
//! ```text
//! ┌──────────┐  ┌──────────┐  ┌──────────┐
//! │   File   │  │ Twitter  │  │  Custom  │
//! │  (CSV)   │  │ (search) │  │  (Rust)  │
//! └────┬─────┘  └────┬─────┘  └────┬─────┘
//!      └─────────────┼─────────────┘
//!                    ▼
//!     pipeline::analyze_source() → report
//! ```
//!
//! # Example
//!
//! ```rust
//! use anyhow::Result;
//! use tweet_sentiment::traits::Source;
//! use tweet_sentiment_core::RawText;
//!
//! struct FixedSource(Vec<String>);
//!
//! impl Source for FixedSource {
//!     fn name(&self) -> &str { "fixed" }
//!     fn description(&self) -> &str { "Texts held in memory" }
//!
//!     fn fetch(&self) -> Result<Vec<RawText>> {
//!         Ok(self.0.iter().enumerate().map(|(i, t)| RawText::new(i, t.clone())).collect())
//!     }
//! }
//!
//! let source = FixedSource(vec!["great day".to_string()]);
//! assert_eq!(source.source_label(), "custom:fixed");
//! ```

use anyhow::Result;
use tweet_sentiment_core::RawText;

/// A producer of texts to analyse.
///
/// Fetching is blocking and happens once per run. Any error is fatal for
/// the run; sources do not retry.
pub trait Source {
    /// Instance name (e.g. the file name or the search topic).
    fn name(&self) -> &str;

    /// One-line description, shown by `tsa sources`.
    fn description(&self) -> &str;

    /// Source type identifier (`"file"`, `"twitter"`, `"custom"`).
    fn source_type(&self) -> &str {
        "custom"
    }

    /// Label used in logs and report headings: `"{type}:{name}"`.
    fn source_label(&self) -> String {
        format!("{}:{}", self.source_type(), self.name())
    }

    /// Produce every text, indexed from 0 in source order.
    fn fetch(&self) -> Result<Vec<RawText>>;
}
