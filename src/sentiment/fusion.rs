// * Fusion Policy
// * Negative-biased reconciliation of the lexicon and classifier verdicts.
// * Rules are evaluated in order:
// * 1. Either side NEGATIVE -> NEGATIVE, confidence = min of both confidences.
// * 2. Labels agree -> that label, confidence = mean of both confidences.
// * 3. Otherwise |lexicon| is compared against the raw classifier confidence; the larger wins.
// ! Rule 3 compares a magnitude against a signed value. Downstream consumers rely on this skew.

use crate::sentiment::types::{FusionResult, FusionRule, ScoredSentiment, SentimentLabel};

pub fn fuse(lexicon: &ScoredSentiment, classifier: &ScoredSentiment) -> FusionResult {
    if lexicon.is_negative() || classifier.is_negative() {
        return FusionResult {
            label: SentimentLabel::Negative,
            confidence: lexicon.confidence.min(classifier.confidence),
            rule: FusionRule::NegativePriority,
        };
    }

    if lexicon.label == classifier.label {
        return FusionResult {
            label: lexicon.label,
            confidence: (lexicon.confidence + classifier.confidence) / 2.0,
            rule: FusionRule::Agreement,
        };
    }

    // * Ties go to the classifier
    if lexicon.confidence.abs() > classifier.confidence {
        FusionResult {
            label: lexicon.label,
            confidence: lexicon.confidence,
            rule: FusionRule::LexiconDominant,
        }
    } else {
        FusionResult {
            label: classifier.label,
            confidence: classifier.confidence,
            rule: FusionRule::ClassifierDominant,
        }
    }
}
