// * Sentiment value types shared by the scorers, the fusion policy and the record store

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of sentiment labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// All labels in the fixed column order used by the per-source view
    pub const ALL: [SentimentLabel; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sentiment label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for SentimentLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "NEUTRAL" => Ok(Self::Neutral),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// Verdict of a single scorer.
///
/// `confidence` is not bounded to [0, 1]: the lexicon scorer reports its signed
/// compound score and the classifier may exceed 1.0 after negative scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentiment {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl ScoredSentiment {
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self { label, confidence }
    }

    /// Neutral verdict with zero confidence, used when a scorer cannot answer
    pub fn neutral_default() -> Self {
        Self::new(SentimentLabel::Neutral, 0.0)
    }

    pub fn is_negative(&self) -> bool {
        self.label == SentimentLabel::Negative
    }
}

/// Which reconciliation rule produced a fused verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionRule {
    NegativePriority,
    Agreement,
    LexiconDominant,
    ClassifierDominant,
}

/// Single verdict for one text sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub rule: FusionRule,
}
