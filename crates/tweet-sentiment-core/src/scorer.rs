//! Scorer trait and the explicit per-item outcome type.
//!
//! A [`Scorer`] wraps a lexicon model. Concrete implementations (VADER)
//! live in the app crate; tests use in-memory scorers.
//!
//! Scoring a batch never aborts on a single bad text. [`score_all`] turns
//! every input into a [`ScoreOutcome`]; callers partition the results.

use thiserror::Error;

use crate::classify::classify;
use crate::models::{LabeledRecord, RawText, ScoreRecord};

/// Why a single text could not be scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("text is empty")]
    EmptyText,
    #[error("scorer returned no '{0}' component")]
    MissingComponent(&'static str),
    #[error("scorer returned a non-finite '{component}' value: {value}")]
    NonFinite { component: &'static str, value: f64 },
    #[error("scorer failed: {0}")]
    Backend(String),
}

/// A lexicon sentiment model.
///
/// Implementations are constructed once by the caller and passed by
/// reference; they must not hold hidden global state.
pub trait Scorer {
    /// Score one text.
    fn score(&self, text: &str) -> Result<ScoreRecord, ScoreError>;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, text: &str) -> Result<ScoreRecord, ScoreError> {
        (**self).score(text)
    }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score(&self, text: &str) -> Result<ScoreRecord, ScoreError> {
        (**self).score(text)
    }
}

/// Result of scoring one [`RawText`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Scored(LabeledRecord),
    Failed {
        index: usize,
        text: String,
        error: ScoreError,
    },
}

impl ScoreOutcome {
    pub fn index(&self) -> usize {
        match self {
            ScoreOutcome::Scored(record) => record.index,
            ScoreOutcome::Failed { index, .. } => *index,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, ScoreOutcome::Scored(_))
    }
}

/// Score and classify a single text.
pub fn score_one<S: Scorer + ?Sized>(scorer: &S, raw: RawText) -> ScoreOutcome {
    match scorer.score(&raw.text) {
        Ok(record) => {
            let sentiment = classify(record.compound);
            ScoreOutcome::Scored(LabeledRecord {
                index: raw.index,
                record,
                sentiment,
            })
        }
        Err(error) => ScoreOutcome::Failed {
            index: raw.index,
            text: raw.text,
            error,
        },
    }
}

/// Score every text sequentially, preserving input order.
pub fn score_all<S, I>(scorer: &S, texts: I) -> Vec<ScoreOutcome>
where
    S: Scorer + ?Sized,
    I: IntoIterator<Item = RawText>,
{
    texts.into_iter().map(|raw| score_one(scorer, raw)).collect()
}
