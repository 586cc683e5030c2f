//! Aggregation of scored texts into a [`SummaryResult`].
//!
//! # Algorithm
//!
//! 1. Score each text in order ([`score_all`]).
//! 2. Partition outcomes into surviving records and failures.
//! 3. No survivors → [`Analysis::Empty`].
//! 4. Otherwise compute the mean compound score and per-category counts,
//!    recounting categories from the records with the classifier thresholds.
//!
//! Ranking ([`SummaryResult::top_positive`], [`SummaryResult::top_negative`])
//! uses a stable sort, so equal scores keep their source order.

use crate::classify::classify;
use crate::models::{Analysis, CategoryCounts, LabeledRecord, RawText, Sentiment, SummaryResult};
use crate::scorer::{score_all, ScoreOutcome, Scorer};

/// Length of the most-positive and most-negative lists in reports.
pub const TOP_K: usize = 5;

/// An [`Analysis`] together with the items that failed to score.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub analysis: Analysis,
    /// Failed outcomes in source order. Every element is a
    /// [`ScoreOutcome::Failed`].
    pub failures: Vec<ScoreOutcome>,
}

/// Score `texts` and reduce the survivors into an [`Analysis`].
///
/// Failed items are dropped. Use [`aggregate_with_failures`] to see them.
pub fn aggregate<S, I>(scorer: &S, texts: I) -> Analysis
where
    S: Scorer + ?Sized,
    I: IntoIterator<Item = RawText>,
{
    aggregate_with_failures(scorer, texts).analysis
}

/// Score `texts`, keeping the failed outcomes alongside the analysis.
pub fn aggregate_with_failures<S, I>(scorer: &S, texts: I) -> AggregateReport
where
    S: Scorer + ?Sized,
    I: IntoIterator<Item = RawText>,
{
    let (scored, failures): (Vec<ScoreOutcome>, Vec<ScoreOutcome>) = score_all(scorer, texts)
        .into_iter()
        .partition(ScoreOutcome::is_scored);

    let records = scored
        .into_iter()
        .filter_map(|outcome| match outcome {
            ScoreOutcome::Scored(record) => Some(record),
            ScoreOutcome::Failed { .. } => None,
        })
        .collect();

    AggregateReport {
        analysis: summarize(records),
        failures,
    }
}

/// Reduce already-labeled records into an [`Analysis`].
pub fn summarize(records: Vec<LabeledRecord>) -> Analysis {
    if records.is_empty() {
        return Analysis::Empty;
    }

    let total_count = records.len();
    let sum: f64 = records.iter().map(LabeledRecord::compound).sum();
    let average_sentiment = sum / total_count as f64;

    let mut counts = CategoryCounts::default();
    for record in &records {
        match classify(record.compound()) {
            Sentiment::Positive => counts.positive += 1,
            Sentiment::Neutral => counts.neutral += 1,
            Sentiment::Negative => counts.negative += 1,
        }
    }

    Analysis::Summary(SummaryResult {
        average_sentiment,
        total_count,
        counts,
        records,
    })
}

impl SummaryResult {
    /// The `k` records with the highest compound score, best first.
    pub fn top_positive(&self, k: usize) -> Vec<&LabeledRecord> {
        let mut ranked: Vec<&LabeledRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.compound().total_cmp(&a.compound()));
        ranked.truncate(k);
        ranked
    }

    /// The `k` records with the lowest compound score, worst first.
    pub fn top_negative(&self, k: usize) -> Vec<&LabeledRecord> {
        let mut ranked: Vec<&LabeledRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| a.compound().total_cmp(&b.compound()));
        ranked.truncate(k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreRecord;
    use crate::scorer::ScoreError;
    use std::collections::HashMap;

    /// Looks scores up in a table; unknown texts fail.
    struct TableScorer(HashMap<&'static str, f64>);

    impl TableScorer {
        fn new(entries: &[(&'static str, f64)]) -> Self {
            Self(entries.iter().copied().collect())
        }
    }

    impl Scorer for TableScorer {
        fn score(&self, text: &str) -> Result<ScoreRecord, ScoreError> {
            let compound = *self
                .0
                .get(text)
                .ok_or_else(|| ScoreError::Backend(format!("unknown text '{}'", text)))?;
            Ok(ScoreRecord {
                text: text.to_string(),
                compound,
                pos: compound.max(0.0),
                neg: (-compound).max(0.0),
                neu: 1.0 - compound.abs(),
            })
        }
    }

    fn raw(texts: &[&str]) -> Vec<RawText> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| RawText::new(i, *t))
            .collect()
    }

    #[test]
    fn test_empty_input_is_empty_signal() {
        let scorer = TableScorer::new(&[]);
        assert_eq!(aggregate(&scorer, Vec::new()), Analysis::Empty);
    }

    #[test]
    fn test_all_failures_is_empty_signal() {
        let scorer = TableScorer::new(&[]);
        let report = aggregate_with_failures(&scorer, raw(&["x", "y"]));
        assert!(report.analysis.is_empty());
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_mean_and_total() {
        let scorer = TableScorer::new(&[("a", 0.3), ("b", -0.1), ("c", 0.9), ("d", 0.0)]);
        let analysis = aggregate(&scorer, raw(&["a", "b", "c", "d"]));
        let summary = analysis.summary().expect("summary");
        assert_eq!(summary.total_count(), 4);
        assert!((summary.average_sentiment() - 0.275).abs() < 1e-9);
    }

    #[test]
    fn test_failed_item_is_dropped_without_gap() {
        let scorer = TableScorer::new(&[("good", 0.6), ("bad", -0.6)]);
        let report = aggregate_with_failures(&scorer, raw(&["good", "broken", "bad"]));
        let summary = report.analysis.summary().expect("summary");

        assert_eq!(summary.total_count(), 2);
        let texts: Vec<&str> = summary.records().iter().map(LabeledRecord::text).collect();
        assert_eq!(texts, vec!["good", "bad"]);
        assert_eq!(
            summary.records().iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 2]
        );

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index(), 1);
        assert!((summary.average_sentiment() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_match_labels_and_total() {
        let scorer = TableScorer::new(&[
            ("p1", 0.05),
            ("p2", 0.7),
            ("n1", -0.05),
            ("z1", 0.049),
            ("z2", -0.049),
        ]);
        let analysis = aggregate(&scorer, raw(&["p1", "p2", "n1", "z1", "z2"]));
        let summary = analysis.summary().unwrap();
        let counts = summary.counts();

        assert_eq!(counts.positive, 2);
        assert_eq!(counts.negative, 1);
        assert_eq!(counts.neutral, 2);
        assert_eq!(counts.total(), summary.total_count());

        for sentiment in Sentiment::ALL {
            let labeled = summary
                .records()
                .iter()
                .filter(|r| r.sentiment == sentiment)
                .count();
            assert_eq!(labeled, counts.get(sentiment));
        }
    }

    #[test]
    fn test_top_lists_are_bounded_and_sorted() {
        let scorer = TableScorer::new(&[
            ("a", 0.1),
            ("b", 0.9),
            ("c", -0.4),
            ("d", 0.5),
            ("e", -0.9),
            ("f", 0.2),
            ("g", 0.0),
        ]);
        let analysis = aggregate(&scorer, raw(&["a", "b", "c", "d", "e", "f", "g"]));
        let summary = analysis.summary().unwrap();

        let top = summary.top_positive(TOP_K);
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].compound() >= w[1].compound()));
        assert_eq!(top[0].text(), "b");

        let bottom = summary.top_negative(TOP_K);
        assert_eq!(bottom.len(), 5);
        assert!(bottom.windows(2).all(|w| w[0].compound() <= w[1].compound()));
        assert_eq!(bottom[0].text(), "e");
    }

    #[test]
    fn test_top_lists_shorter_than_k() {
        let scorer = TableScorer::new(&[("a", 0.1), ("b", -0.2)]);
        let analysis = aggregate(&scorer, raw(&["a", "b"]));
        let summary = analysis.summary().unwrap();
        assert_eq!(summary.top_positive(TOP_K).len(), 2);
        assert_eq!(summary.top_negative(TOP_K).len(), 2);
        assert_eq!(summary.top_positive(0).len(), 0);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let scorer = TableScorer::new(&[("first", 0.5), ("second", 0.5), ("third", 0.5)]);
        let analysis = aggregate(&scorer, raw(&["first", "second", "third"]));
        let summary = analysis.summary().unwrap();

        let top: Vec<&str> = summary.top_positive(TOP_K).iter().map(|r| r.text()).collect();
        assert_eq!(top, vec!["first", "second", "third"]);

        let bottom: Vec<&str> = summary.top_negative(TOP_K).iter().map(|r| r.text()).collect();
        assert_eq!(bottom, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_summarize_empty_records() {
        assert_eq!(summarize(Vec::new()), Analysis::Empty);
    }
}
