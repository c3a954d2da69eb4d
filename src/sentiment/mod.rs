// * Dual-model sentiment scoring
// * Two independent scorers behind one trait, reconciled by a negative-biased fusion policy

#[cfg(feature = "ml")]
pub mod bert;
pub mod classifier;
pub mod fusion;
pub mod lexicon;
pub mod model;
pub mod scorer;
pub mod types;

// * Re-exports for convenient access
pub use classifier::ClassifierScorer;
pub use fusion::fuse;
pub use lexicon::LexiconScorer;
pub use model::{
    load_or_unavailable, load_star_classifier, parse_star_label, ClassifierConfig,
    InferenceError, ModelLoadError, StarClassifier, StarPrediction, UnavailableClassifier,
};
pub use scorer::SentimentScorer;
pub use types::{FusionResult, FusionRule, ScoredSentiment, SentimentLabel, UnknownLabel};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct FailingClassifier;

    impl StarClassifier for FailingClassifier {
        fn predict(&self, _text: &str) -> Result<StarPrediction, InferenceError> {
            Err(InferenceError::Forward("simulated".to_string()))
        }
    }

    #[test]
    fn test_scorers_share_one_interface() {
        let scorers: Vec<Box<dyn SentimentScorer>> = vec![
            Box::new(LexiconScorer::new()),
            Box::new(ClassifierScorer::new(Arc::new(FailingClassifier))),
        ];

        let names: Vec<&str> = scorers.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["lexicon", "classifier"]);
    }

    #[test]
    fn test_integration_lexicon_with_failing_classifier() {
        let lexicon = LexiconScorer::new();
        let classifier = ClassifierScorer::new(Arc::new(FailingClassifier));
        let text = "The room was dirty and the staff were rude. Horrible stay.";

        let fused = fuse(&lexicon.score(text), &classifier.score(text));

        assert_eq!(fused.label, SentimentLabel::Negative);
        assert_eq!(fused.rule, FusionRule::NegativePriority);
        assert!(fused.confidence < 0.0);
    }
}
