// * Aggregate views over stored records
// * Each view degrades on its own when the columns it needs are missing.

use crate::analysis::words::{word_frequencies, WordCount};
use crate::config::constants::{COLUMN_SENTIMENT, COLUMN_SOURCE, COLUMN_TEXT, MAX_CLOUD_WORDS};
use crate::persistence::csv_store::RecordTable;
use crate::sentiment::types::SentimentLabel;
use serde::Serialize;
use std::collections::BTreeMap;

/// A view that is either computed or unavailable with a reason
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum View<T> {
    Available { data: T },
    Unavailable { reason: String },
}

impl<T> View<T> {
    fn missing(column: &str) -> Self {
        Self::Unavailable {
            reason: format!("No '{column}' column found"),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Available { data } => Some(data),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Share of one label in the distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Label counts for one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceBreakdown {
    pub source: String,
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total_rows: usize,
    pub sentiment_distribution: View<Vec<LabelShare>>,
    pub sentiment_by_source: View<Vec<SourceBreakdown>>,
    pub word_frequencies: View<Vec<WordCount>>,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub fn analyze(table: &RecordTable) -> AnalysisReport {
    let report = AnalysisReport {
        total_rows: table.len(),
        sentiment_distribution: sentiment_distribution(table),
        sentiment_by_source: sentiment_by_source(table),
        word_frequencies: text_word_frequencies(table),
    };

    tracing::info!(
        rows = report.total_rows,
        distribution = report.sentiment_distribution.is_available(),
        by_source = report.sentiment_by_source.is_available(),
        words = report.word_frequencies.is_available(),
        "Analysis completed"
    );

    report
}

/// Counts per label, most frequent first; ties keep first-seen order
pub fn sentiment_distribution(table: &RecordTable) -> View<Vec<LabelShare>> {
    let Some(labels) = table.column(COLUMN_SENTIMENT) else {
        return View::missing(COLUMN_SENTIMENT);
    };

    let mut shares: Vec<LabelShare> = Vec::new();
    for label in labels.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        match shares.iter_mut().find(|s| s.label == label) {
            Some(share) => share.count += 1,
            None => shares.push(LabelShare {
                label: label.to_string(),
                count: 1,
                percent: 0.0,
            }),
        }
    }

    let total: usize = shares.iter().map(|s| s.count).sum();
    for share in &mut shares {
        share.percent = share.count as f64 * 100.0 / total as f64;
    }
    shares.sort_by(|a, b| b.count.cmp(&a.count));

    View::Available { data: shares }
}

/// NEGATIVE / NEUTRAL / POSITIVE counts per source, sources in name order
pub fn sentiment_by_source(table: &RecordTable) -> View<Vec<SourceBreakdown>> {
    let Some(sources) = table.column(COLUMN_SOURCE) else {
        return View::missing(COLUMN_SOURCE);
    };
    let Some(labels) = table.column(COLUMN_SENTIMENT) else {
        return View::missing(COLUMN_SENTIMENT);
    };

    let mut by_source: BTreeMap<&str, SourceBreakdown> = BTreeMap::new();
    for (source, label) in sources.iter().zip(labels.iter()) {
        let entry = by_source.entry(source.trim()).or_insert_with(|| SourceBreakdown {
            source: source.trim().to_string(),
            ..Default::default()
        });
        match label.parse::<SentimentLabel>() {
            Ok(SentimentLabel::Negative) => entry.negative += 1,
            Ok(SentimentLabel::Neutral) => entry.neutral += 1,
            Ok(SentimentLabel::Positive) => entry.positive += 1,
            Err(e) => tracing::debug!(error = %e, "Skipping row outside the label set"),
        }
    }

    View::Available {
        data: by_source.into_values().collect(),
    }
}

pub fn text_word_frequencies(table: &RecordTable) -> View<Vec<WordCount>> {
    match table.column(COLUMN_TEXT) {
        Some(texts) => View::Available {
            data: word_frequencies(texts, MAX_CLOUD_WORDS),
        },
        None => View::missing(COLUMN_TEXT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RecordTable {
        RecordTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn full_table() -> RecordTable {
        table(
            &["Text", "Sentiment", "Source"],
            &[
                &["Great pool", "POSITIVE", "Web"],
                &["Dirty rooms", "NEGATIVE", "Web"],
                &["Noisy street", "NEGATIVE", "File"],
                &["It was fine", "NEUTRAL", "Web"],
            ],
        )
    }

    #[test]
    fn test_distribution_sorted_with_percentages() {
        let view = sentiment_distribution(&full_table());
        let shares = view.data().unwrap();

        assert_eq!(shares[0].label, "NEGATIVE");
        assert_eq!(shares[0].count, 2);
        assert!((shares[0].percent - 50.0).abs() < 1e-9);
        assert_eq!(shares.len(), 3);
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_by_source_fills_zeros() {
        let view = sentiment_by_source(&full_table());
        let rows = view.data().unwrap();

        assert_eq!(
            rows,
            &vec![
                SourceBreakdown { source: "File".into(), negative: 1, neutral: 0, positive: 0 },
                SourceBreakdown { source: "Web".into(), negative: 1, neutral: 1, positive: 1 },
            ]
        );
    }

    #[test]
    fn test_missing_source_degrades_only_that_view() {
        let t = table(&["Text", "Sentiment"], &[&["Nice", "POSITIVE"]]);
        let report = analyze(&t);

        assert!(report.sentiment_distribution.is_available());
        assert!(report.word_frequencies.is_available());
        assert_eq!(
            report.sentiment_by_source,
            View::Unavailable { reason: "No 'Source' column found".to_string() }
        );
    }

    #[test]
    fn test_missing_text_and_sentiment() {
        let t = table(&["Source"], &[&["Web"]]);
        let report = analyze(&t);

        assert!(!report.sentiment_distribution.is_available());
        assert!(!report.sentiment_by_source.is_available());
        assert!(!report.word_frequencies.is_available());
        assert_eq!(report.total_rows, 1);
    }

    #[test]
    fn test_report_json_shape() {
        let json = analyze(&full_table()).to_json_pretty();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_rows"], 4);
        assert_eq!(value["sentiment_distribution"]["status"], "available");
        assert_eq!(value["word_frequencies"]["data"][0]["count"], 1);
    }
}
