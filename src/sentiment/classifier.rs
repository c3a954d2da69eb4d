// * Pretrained Classifier Scorer
// * Remaps the 5-star ordinal output to the 3-label set with deliberately skewed confidence.
// * Inference failures are absorbed into (NEUTRAL, 0.0) and never reach the pipeline.

use crate::config::constants::{
    CLASSIFIER_MAX_CHARS, NEGATIVE_CONFIDENCE_SCALE, NEUTRAL_CONFIDENCE_SCALE,
    POSITIVE_CONFIDENCE_SCALE, STAR_NEGATIVE_THRESHOLD, STAR_POSITIVE_THRESHOLD,
};
use crate::sentiment::model::{InferenceError, StarClassifier, StarPrediction};
use crate::sentiment::scorer::SentimentScorer;
use crate::sentiment::types::{ScoredSentiment, SentimentLabel};
use std::sync::Arc;

pub struct ClassifierScorer {
    model: Arc<dyn StarClassifier>,
    max_chars: usize,
}

impl ClassifierScorer {
    /// Wraps an already-built model handle
    pub fn new(model: Arc<dyn StarClassifier>) -> Self {
        Self::with_max_chars(model, CLASSIFIER_MAX_CHARS)
    }

    pub fn with_max_chars(model: Arc<dyn StarClassifier>, max_chars: usize) -> Self {
        Self { model, max_chars }
    }

    /// Runs inference and surfaces the error instead of absorbing it
    pub fn try_score(&self, text: &str) -> Result<ScoredSentiment, InferenceError> {
        let prediction = self.model.predict(truncate_chars(text, self.max_chars))?;
        Ok(Self::remap(prediction))
    }

    /// Star thresholds are inclusive: 4.0 is POSITIVE, 2.5 is NEGATIVE.
    /// NEGATIVE confidence is amplified and may exceed 1.0.
    pub fn remap(prediction: StarPrediction) -> ScoredSentiment {
        let StarPrediction { stars, confidence } = prediction;
        if stars >= STAR_POSITIVE_THRESHOLD {
            ScoredSentiment::new(SentimentLabel::Positive, confidence * POSITIVE_CONFIDENCE_SCALE)
        } else if stars <= STAR_NEGATIVE_THRESHOLD {
            ScoredSentiment::new(SentimentLabel::Negative, confidence * NEGATIVE_CONFIDENCE_SCALE)
        } else {
            ScoredSentiment::new(SentimentLabel::Neutral, confidence * NEUTRAL_CONFIDENCE_SCALE)
        }
    }
}

impl SentimentScorer for ClassifierScorer {
    fn name(&self) -> &str {
        "classifier"
    }

    fn score(&self, text: &str) -> ScoredSentiment {
        match self.try_score(text) {
            Ok(scored) => scored,
            Err(e) => {
                tracing::warn!(error = %e, "Classifier inference failed, using neutral default");
                ScoredSentiment::neutral_default()
            }
        }
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
