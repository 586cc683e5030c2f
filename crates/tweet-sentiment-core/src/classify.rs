//! Threshold classifier mapping a compound score to a [`Sentiment`].
//!
//! ```text
//! compound >=  0.05  → Positive
//! compound <= -0.05  → Negative
//! otherwise          → Neutral
//! ```
//!
//! Both boundaries are inclusive. NaN falls through to `Neutral`.

use crate::models::Sentiment;

/// Lowest compound score classified as [`Sentiment::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Highest compound score classified as [`Sentiment::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Classify a compound score.
///
/// # Example
///
/// ```rust
/// use tweet_sentiment_core::{classify, Sentiment};
///
/// assert_eq!(classify(0.05), Sentiment::Positive);
/// assert_eq!(classify(0.0), Sentiment::Neutral);
/// assert_eq!(classify(-0.05), Sentiment::Negative);
/// ```
pub fn classify(compound: f64) -> Sentiment {
    if compound >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
