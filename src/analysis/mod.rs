// * Downstream analysis of stored review records
// * Produces the data behind the distribution, per-source and word-cloud charts

pub mod report;
pub mod words;

// * Re-exports for convenient access
pub use report::{
    analyze, sentiment_by_source, sentiment_distribution, text_word_frequencies, AnalysisReport,
    LabelShare, SourceBreakdown, View,
};
pub use words::{clean_text, is_stopword, word_frequencies, WordCount};
