// * Telemetry - structured logging and per-run label tallies
// * JSON lines by default, pretty output for interactive use

use crate::persistence::record::ReviewRecord;
use crate::sentiment::types::SentimentLabel;
use std::collections::BTreeMap;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// * Default directive when RUST_LOG is unset
pub const DEFAULT_FILTER: &str = "review_sentiment=info";

/// Filter directive for a `-v` count: 0 = info, 1 = debug, 2+ = trace
pub fn filter_for_verbosity(verbosity: u8) -> String {
    match verbosity {
        0 => DEFAULT_FILTER.to_string(),
        1 => "review_sentiment=debug".to_string(),
        _ => "review_sentiment=trace".to_string(),
    }
}

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use review_sentiment::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(url = "https://example.com", "Scrape started");
/// ```
pub fn init_tracing() {
    init_tracing_with_level(DEFAULT_FILTER);
}

/// Initializes tracing with a custom filter directive
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .init();
}

/// Label counts over one run's records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTally {
    counts: BTreeMap<SentimentLabel, usize>,
    confidence_sum: f64,
}

impl LabelTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[ReviewRecord]) -> Self {
        let mut tally = Self::new();
        for record in records {
            tally.record(record);
        }
        tally
    }

    pub fn record(&mut self, record: &ReviewRecord) {
        *self.counts.entry(record.sentiment).or_insert(0) += 1;
        self.confidence_sum += record.confidence;
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Mean signed confidence; 0.0 for an empty tally
    pub fn mean_confidence(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.confidence_sum / n as f64,
        }
    }

    pub fn log_summary(&self) {
        info!(
            total = self.total(),
            positive = self.count(SentimentLabel::Positive),
            neutral = self.count(SentimentLabel::Neutral),
            negative = self.count(SentimentLabel::Negative),
            mean_confidence = self.mean_confidence(),
            "Run summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(label: SentimentLabel, confidence: f64) -> ReviewRecord {
        ReviewRecord {
            text: "sample".to_string(),
            sentiment: label,
            source: "Web".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            user_id: "Unknown".to_string(),
            location: "Unknown".to_string(),
            confidence,
        }
    }

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for_verbosity(0), DEFAULT_FILTER);
        assert_eq!(filter_for_verbosity(1), "review_sentiment=debug");
        assert_eq!(filter_for_verbosity(7), "review_sentiment=trace");
    }

    #[test]
    fn test_tally_counts_labels() {
        let tally = LabelTally::from_records(&[
            record(SentimentLabel::Positive, 0.6),
            record(SentimentLabel::Negative, -0.4),
            record(SentimentLabel::Positive, 0.8),
        ]);

        assert_eq!(tally.total(), 3);
        assert_eq!(tally.count(SentimentLabel::Positive), 2);
        assert_eq!(tally.count(SentimentLabel::Negative), 1);
        assert_eq!(tally.count(SentimentLabel::Neutral), 0);
        assert!((tally.mean_confidence() - (1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tally() {
        let tally = LabelTally::new();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.mean_confidence(), 0.0);
    }
}
