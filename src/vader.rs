//! VADER-backed [`Scorer`].
//!
//! Wraps `vader_sentiment::SentimentIntensityAnalyzer`. The analyzer loads
//! its lexicon on construction, so build one [`VaderScorer`] per process and
//! pass it by reference.

use tweet_sentiment_core::{ScoreError, ScoreRecord, Scorer};
use vader_sentiment::SentimentIntensityAnalyzer;

pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for VaderScorer {
    /// Blank text is rejected: a missing cell in a source table arrives
    /// here as an empty string and must be skipped, not scored as neutral.
    fn score(&self, text: &str) -> Result<ScoreRecord, ScoreError> {
        if text.trim().is_empty() {
            return Err(ScoreError::EmptyText);
        }

        let scores = self.analyzer.polarity_scores(text);
        let component = |name: &'static str| -> Result<f64, ScoreError> {
            let value = *scores
                .get(name)
                .ok_or(ScoreError::MissingComponent(name))?;
            if !value.is_finite() {
                return Err(ScoreError::NonFinite {
                    component: name,
                    value,
                });
            }
            Ok(value)
        };

        Ok(ScoreRecord {
            text: text.to_string(),
            compound: component("compound")?,
            pos: component("pos")?,
            neg: component("neg")?,
            neu: component("neu")?,
        })
    }
}
