// * Common capability of both scorers: turn one text sample into a verdict.
// * The fusion step only sees `ScoredSentiment` values, never the scorer behind them.

use crate::sentiment::types::ScoredSentiment;

pub trait SentimentScorer {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Scores one text. Implementations never fail; errors degrade to a default verdict.
    fn score(&self, text: &str) -> ScoredSentiment;
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn score(&self, text: &str) -> ScoredSentiment {
        (**self).score(text)
    }
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn score(&self, text: &str) -> ScoredSentiment {
        (**self).score(text)
    }
}
