// * End-to-end runs: URL or text file in, review records out

use crate::network::errors::FetchError;
use crate::network::source::FragmentSource;
use crate::persistence::csv_store::StorageError;
use crate::persistence::record::ReviewRecord;
use crate::sentiment::scorer::SentimentScorer;
use std::path::Path;
use tracing::{error, info, warn};

use super::pipeline::SentimentPipeline;

/// Result of a run that did not fail outright
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeOutcome {
    Records(Vec<ReviewRecord>),
    /// No fragment qualified; nothing should be saved
    NoData,
}

impl ScrapeOutcome {
    fn from_records(records: Vec<ReviewRecord>) -> Self {
        if records.is_empty() {
            Self::NoData
        } else {
            Self::Records(records)
        }
    }

    pub fn records(&self) -> &[ReviewRecord] {
        match self {
            Self::Records(records) => records,
            Self::NoData => &[],
        }
    }

    pub fn into_records(self) -> Vec<ReviewRecord> {
        match self {
            Self::Records(records) => records,
            Self::NoData => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Fetches `url` through `source` and scores every qualifying sample.
///
/// A fetch failure aborts the whole run; no partial record list is returned.
pub async fn scrape<F, L, C>(
    url: &str,
    source: &F,
    pipeline: &SentimentPipeline<L, C>,
) -> Result<ScrapeOutcome, FetchError>
where
    F: FragmentSource + ?Sized,
    L: SentimentScorer,
    C: SentimentScorer,
{
    info!(url = %url, source = source.name(), "Scrape started");

    let fragments = match source.fetch_fragments(url).await {
        Ok(fragments) => fragments,
        Err(e) => {
            error!(url = %url, source = source.name(), error = %e, "Fetch failed");
            return Err(e);
        }
    };
    let outcome = ScrapeOutcome::from_records(pipeline.run(&fragments));

    match &outcome {
        ScrapeOutcome::Records(records) => {
            info!(url = %url, records = records.len(), "Scrape completed")
        }
        ScrapeOutcome::NoData => warn!(url = %url, "No valid review data found"),
    }

    Ok(outcome)
}

/// Scores a plain text body, one fragment per line
pub fn ingest_text<L, C>(contents: &str, pipeline: &SentimentPipeline<L, C>) -> ScrapeOutcome
where
    L: SentimentScorer,
    C: SentimentScorer,
{
    let fragments: Vec<&str> = contents.lines().collect();
    ScrapeOutcome::from_records(pipeline.run(&fragments))
}

/// Reads `path` and scores it like [`ingest_text`].
///
/// The pipeline's assembler decides the source tag; the CLI configures it
/// with the file tag (`"File"`).
pub fn ingest_file<L, C>(path: &Path, pipeline: &SentimentPipeline<L, C>) -> Result<ScrapeOutcome, StorageError>
where
    L: SentimentScorer,
    C: SentimentScorer,
{
    let contents = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = ingest_text(&contents, pipeline);
    info!(path = %path.display(), records = outcome.records().len(), "File ingested");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::FILE_SOURCE_TAG;
    use crate::config::AppConfig;
    use crate::network::source::StaticFragments;
    use crate::sentiment::model::{InferenceError, StarClassifier, StarPrediction};
    use crate::sentiment::types::SentimentLabel;
    use std::io::Write;
    use std::sync::Arc;

    struct FixedStars(f64);

    impl StarClassifier for FixedStars {
        fn predict(&self, _text: &str) -> Result<StarPrediction, InferenceError> {
            Ok(StarPrediction {
                stars: self.0,
                confidence: 0.9,
            })
        }
    }

    fn pipeline(config: &AppConfig, stars: f64) -> SentimentPipeline {
        SentimentPipeline::from_config(config, Arc::new(FixedStars(stars)))
    }

    const GOOD: &str = "The staff were wonderful and the room was clean, bright and very comfortable.";
    const BAD: &str = "Terrible service, rude staff, and the room was dirty. I hated every minute of it.";

    #[tokio::test]
    async fn test_scrape_produces_records_in_order() {
        let source = StaticFragments::new(vec![
            "Menu".to_string(),
            GOOD.to_string(),
            BAD.to_string(),
        ]);
        let p = pipeline(&AppConfig::new(), 5.0);

        let outcome = scrape("https://example.com/reviews", &source, &p).await.unwrap();
        let records = outcome.records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, GOOD);
        assert_eq!(records[0].sentiment, SentimentLabel::Positive);
        assert_eq!(records[1].text, BAD);
        assert_eq!(records[1].sentiment, SentimentLabel::Negative);
        assert!(records.iter().all(|r| r.source == "Web"));
    }

    #[tokio::test]
    async fn test_scrape_without_qualifying_text_is_no_data() {
        let source = StaticFragments::new(vec!["Home".to_string(), "Contact us".to_string()]);
        let p = pipeline(&AppConfig::new(), 3.0);

        let outcome = scrape("https://example.com", &source, &p).await.unwrap();
        assert_eq!(outcome, ScrapeOutcome::NoData);
        assert!(outcome.into_records().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_fetch_failure_aborts() {
        let source = StaticFragments::new(vec![GOOD.to_string()]);
        let p = pipeline(&AppConfig::new(), 5.0);

        let result = scrape("not a url", &source, &p).await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_ingest_text_splits_lines() {
        let p = pipeline(&AppConfig::new().with_source(FILE_SOURCE_TAG), 4.5);
        let body = format!("{GOOD}\nshort line\n{GOOD}\n");

        let outcome = ingest_text(&body, &p);
        assert_eq!(outcome.records().len(), 2);
        assert!(outcome.records().iter().all(|r| r.source == "File"));
    }

    #[test]
    fn test_ingest_file_reads_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{GOOD}").unwrap();
        writeln!(file, "{BAD}").unwrap();
        let p = pipeline(&AppConfig::new().with_source(FILE_SOURCE_TAG), 4.0);

        let outcome = ingest_file(file.path(), &p).unwrap();
        assert_eq!(outcome.records().len(), 2);
    }

    #[test]
    fn test_ingest_missing_file_is_storage_error() {
        let p = pipeline(&AppConfig::new(), 4.0);
        let result = ingest_file(Path::new("/definitely/not/here.txt"), &p);
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }
}
