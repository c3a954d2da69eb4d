// * Sentiment Pipeline
// * fragments -> samples -> {lexicon, classifier} -> fusion -> records
// * Single-threaded and synchronous: samples are scored one at a time, in input order.
// * No sample's verdict depends on any other sample.

use crate::config::AppConfig;
use crate::persistence::record::{RecordAssembler, ReviewRecord};
use crate::refinery::extraction::{TextExtractor, TextSample};
use crate::sentiment::classifier::ClassifierScorer;
use crate::sentiment::fusion::fuse;
use crate::sentiment::lexicon::LexiconScorer;
use crate::sentiment::model::StarClassifier;
use crate::sentiment::scorer::SentimentScorer;
use crate::sentiment::types::FusionResult;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SentimentPipeline<L = LexiconScorer, C = ClassifierScorer> {
    extractor: TextExtractor,
    lexicon: L,
    classifier: C,
    assembler: RecordAssembler,
}

impl SentimentPipeline {
    /// Default scorers around an already-built classifier handle
    pub fn from_config(config: &AppConfig, model: Arc<dyn StarClassifier>) -> Self {
        Self::new(
            TextExtractor::with_config(config.extraction.clone()),
            LexiconScorer::new(),
            ClassifierScorer::with_max_chars(model, config.classifier.max_chars),
            RecordAssembler::with_config(config.assembler.clone()),
        )
    }
}

impl<L: SentimentScorer, C: SentimentScorer> SentimentPipeline<L, C> {
    pub fn new(extractor: TextExtractor, lexicon: L, classifier: C, assembler: RecordAssembler) -> Self {
        Self {
            extractor,
            lexicon,
            classifier,
            assembler,
        }
    }

    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    /// Fused verdict for one piece of text, as-is (no filtering or wrapping)
    pub fn score_text(&self, text: &str) -> FusionResult {
        let lexicon = self.lexicon.score(text);
        let classifier = self.classifier.score(text);
        let fused = fuse(&lexicon, &classifier);

        debug!(
            lexicon = %lexicon.label,
            lexicon_confidence = lexicon.confidence,
            classifier = %classifier.label,
            classifier_confidence = classifier.confidence,
            fused = %fused.label,
            rule = ?fused.rule,
            "Sample scored"
        );

        fused
    }

    pub fn score_sample(&self, sample: &TextSample) -> FusionResult {
        self.score_text(sample.text())
    }

    /// Extracts samples from `fragments` and turns each into one record
    pub fn run<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<ReviewRecord> {
        let samples = self.extractor.extract(fragments);

        let records: Vec<ReviewRecord> = samples
            .iter()
            .map(|sample| self.assembler.assemble(sample, &self.score_sample(sample)))
            .collect();

        info!(
            fragments = fragments.len(),
            samples = samples.len(),
            records = records.len(),
            source = %self.assembler.config().source,
            "Pipeline run completed"
        );

        records
    }
}
