// * Review records and the Record Assembler
// * One record per text sample, immutable once built, serialized with the fixed column schema

use crate::config::constants::{TIMESTAMP_FORMAT, UNKNOWN_PLACEHOLDER, WEB_SOURCE_TAG};
use crate::refinery::extraction::TextSample;
use crate::sentiment::types::{FusionResult, SentimentLabel};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Exported unit: one scored sample plus capture metadata.
///
/// Field order and `rename`s define the CSV columns:
/// `Text, Sentiment, Source, Date/Time, User ID, Location, Confidence Score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: SentimentLabel,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Date/Time", with = "capture_time")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "User ID")]
    pub user_id: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Confidence Score")]
    pub confidence: f64,
}

impl ReviewRecord {
    /// Capture time in `YYYY-MM-DD HH:MM:SS`
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Fixed metadata stamped onto every record
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Channel tag, e.g. "Web" for scraped input
    pub source: String,
    /// Placeholder identity; no identity resolution is performed
    pub user_id: String,
    /// Placeholder location
    pub location: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            source: WEB_SOURCE_TAG.to_string(),
            user_id: UNKNOWN_PLACEHOLDER.to_string(),
            location: UNKNOWN_PLACEHOLDER.to_string(),
        }
    }
}

impl AssemblerConfig {
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }
}

pub struct RecordAssembler {
    config: AssemblerConfig,
}

impl RecordAssembler {
    pub fn new() -> Self {
        Self::with_config(AssemblerConfig::default())
    }

    pub fn with_config(config: AssemblerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Builds a record stamped with the current local wall-clock time
    pub fn assemble(&self, sample: &TextSample, verdict: &FusionResult) -> ReviewRecord {
        self.assemble_at(sample, verdict, current_timestamp())
    }

    /// Builds a record with an explicit capture time
    pub fn assemble_at(
        &self,
        sample: &TextSample,
        verdict: &FusionResult,
        captured_at: NaiveDateTime,
    ) -> ReviewRecord {
        ReviewRecord {
            text: sample.text().to_string(),
            sentiment: verdict.label,
            source: self.config.source.clone(),
            timestamp: captured_at,
            user_id: self.config.user_id.clone(),
            location: self.config.location.clone(),
            confidence: verdict.confidence,
        }
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Local wall-clock time truncated to whole seconds
pub fn current_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

// * serde adapter for the `Date/Time` column
mod capture_time {
    use crate::config::constants::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
