// * Pretrained classifier handle
// * The 5-star model is built once per process and passed into the scorer explicitly.

use crate::config::constants::{CLASSIFIER_MAX_CHARS, DEFAULT_MODEL_ID};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the pretrained star classifier
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Hugging Face model id
    pub model_id: String,
    /// Optional hub revision (branch, tag or commit)
    pub revision: Option<String>,
    /// Optional cache directory for downloaded files
    pub cache_dir: Option<PathBuf>,
    /// Characters kept from each sample before inference
    pub max_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: None,
            cache_dir: None,
            max_chars: CLASSIFIER_MAX_CHARS,
        }
    }
}

/// Native output of the ordinal classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPrediction {
    /// Star value in {1, ..., 5}
    pub stars: f64,
    /// Probability of the winning class in [0, 1]
    pub confidence: f64,
}

/// Errors raised while running inference on one text
#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Forward pass failed: {0}")]
    Forward(String),

    #[error("Unparseable star label: {0}")]
    Label(String),
}

/// Errors raised while building the model handle
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Classifier backend not compiled in (enable the `ml` feature)")]
    FeatureDisabled,

    #[error("Model download failed: {0}")]
    Download(String),

    #[error("Invalid model config: {0}")]
    Config(String),

    #[error("Tokenizer load failed: {0}")]
    Tokenizer(String),

    #[error("Weight load failed: {0}")]
    Weights(String),
}

/// Long-lived handle to an ordinal 5-star sentiment model
pub trait StarClassifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<StarPrediction, InferenceError>;
}

impl<C: StarClassifier + ?Sized> StarClassifier for Arc<C> {
    fn predict(&self, text: &str) -> Result<StarPrediction, InferenceError> {
        (**self).predict(text)
    }
}

/// Handle used when no model could be built. Every prediction fails.
#[derive(Debug, Clone)]
pub struct UnavailableClassifier {
    reason: String,
}

impl UnavailableClassifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl StarClassifier for UnavailableClassifier {
    fn predict(&self, _text: &str) -> Result<StarPrediction, InferenceError> {
        Err(InferenceError::Unavailable(self.reason.clone()))
    }
}

/// Reads the star value from a label such as `"4 stars"` or `"1 star"`
pub fn parse_star_label(label: &str) -> Result<f64, InferenceError> {
    label
        .split_whitespace()
        .next()
        .and_then(|head| head.parse::<f64>().ok())
        .ok_or_else(|| InferenceError::Label(label.to_string()))
}

/// Builds the process-wide classifier handle
#[cfg(feature = "ml")]
pub async fn load_star_classifier(
    config: &ClassifierConfig,
) -> Result<Arc<dyn StarClassifier>, ModelLoadError> {
    let model = crate::sentiment::bert::BertStarClassifier::load(config).await?;
    Ok(Arc::new(model))
}

/// Builds the process-wide classifier handle
#[cfg(not(feature = "ml"))]
pub async fn load_star_classifier(
    _config: &ClassifierConfig,
) -> Result<Arc<dyn StarClassifier>, ModelLoadError> {
    Err(ModelLoadError::FeatureDisabled)
}

/// Builds the handle, falling back to an unavailable one so scoring degrades instead of aborting
pub async fn load_or_unavailable(config: &ClassifierConfig) -> Arc<dyn StarClassifier> {
    match load_star_classifier(config).await {
        Ok(model) => {
            tracing::info!(model_id = %config.model_id, "Star classifier loaded");
            model
        }
        Err(e) => {
            tracing::warn!(
                model_id = %config.model_id,
                error = %e,
                "Star classifier unavailable, classifier verdicts will be neutral"
            );
            Arc::new(UnavailableClassifier::new(e.to_string()))
        }
    }
}
