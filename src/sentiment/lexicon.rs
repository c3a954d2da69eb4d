// * Lexicon Scorer
// * Rule-based polarity over raw text using the VADER lexicon and its heuristics
// * (negation, intensifiers, punctuation emphasis). Stateless and deterministic.

use crate::config::constants::{LEXICON_NEGATIVE_THRESHOLD, LEXICON_POSITIVE_THRESHOLD};
use crate::sentiment::scorer::SentimentScorer;
use crate::sentiment::types::{ScoredSentiment, SentimentLabel};
use vader_sentiment::SentimentIntensityAnalyzer;

pub struct LexiconScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity in [-1, 1]
    pub fn compound(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }

    /// Maps a compound score to a verdict. Both thresholds are inclusive and the
    /// confidence is the compound itself, negative for NEGATIVE.
    pub fn classify_compound(compound: f64) -> ScoredSentiment {
        let label = if compound >= LEXICON_POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= LEXICON_NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        ScoredSentiment::new(label, compound)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str) -> ScoredSentiment {
        Self::classify_compound(self.compound(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries_are_inclusive() {
        assert_eq!(LexiconScorer::classify_compound(0.1).label, SentimentLabel::Positive);
        assert_eq!(LexiconScorer::classify_compound(-0.02).label, SentimentLabel::Negative);
    }

    #[test]
    fn test_neutral_band() {
        for compound in [0.0, 0.05, 0.0999, -0.0199] {
            let scored = LexiconScorer::classify_compound(compound);
            assert_eq!(scored.label, SentimentLabel::Neutral, "compound {compound}");
            assert_eq!(scored.confidence, compound);
        }
    }

    #[test]
    fn test_negative_confidence_keeps_sign() {
        let scored = LexiconScorer::classify_compound(-0.6);
        assert_eq!(scored.label, SentimentLabel::Negative);
        assert_eq!(scored.confidence, -0.6);
    }

    #[test]
    fn test_scores_real_text() {
        let scorer = LexiconScorer::new();

        let positive = scorer.score("I love this place, the staff were wonderful and friendly!");
        assert_eq!(positive.label, SentimentLabel::Positive);
        assert!(positive.confidence > 0.1);

        let negative = scorer.score("Terrible service. The food was awful and cold.");
        assert_eq!(negative.label, SentimentLabel::Negative);
        assert!(negative.confidence < 0.0);
    }

    #[test]
    fn test_deterministic() {
        let scorer = LexiconScorer::new();
        let text = "Not bad at all, but the wait was long.";
        assert_eq!(scorer.score(text), scorer.score(text));
    }
}
