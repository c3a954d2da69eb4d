// * Runtime configuration
// * Every component config defaults from `constants` and can be overridden by the CLI

pub mod constants;

use crate::network::browser::BrowserConfig;
use crate::persistence::record::AssemblerConfig;
use crate::refinery::extraction::ExtractionConfig;
use crate::sentiment::model::ClassifierConfig;

/// Aggregate configuration for one process
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub classifier: ClassifierConfig,
    pub assembler: AssemblerConfig,
    pub browser: BrowserConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pretrained model id
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.classifier.model_id = model_id.into();
        self
    }

    /// Replaces the post-navigation settle delay
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.browser.settle_delay_ms = ms;
        self
    }

    /// Replaces the record source tag
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.assembler.source = source.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::constants::*;
    use super::*;

    #[test]
    fn test_defaults_follow_constants() {
        let config = AppConfig::new();

        assert_eq!(config.extraction.min_chars, MIN_FRAGMENT_CHARS);
        assert_eq!(config.extraction.max_chars, MAX_FRAGMENT_CHARS);
        assert_eq!(config.extraction.width, SAMPLE_WIDTH);
        assert_eq!(config.classifier.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.assembler.source, WEB_SOURCE_TAG);
        assert_eq!(config.browser.settle_delay_ms, SETTLE_DELAY_MS);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::new()
            .with_model_id("local/model")
            .with_settle_delay_ms(10)
            .with_source(FILE_SOURCE_TAG);

        assert_eq!(config.classifier.model_id, "local/model");
        assert_eq!(config.browser.settle_delay_ms, 10);
        assert_eq!(config.assembler.source, "File");
    }

    #[test]
    fn test_column_order() {
        assert_eq!(
            RECORD_COLUMNS,
            ["Text", "Sentiment", "Source", "Date/Time", "User ID", "Location", "Confidence Score"]
        );
    }
}
