// * Text Extraction Pipeline
// * Filters raw page fragments by length, then wraps each survivor into samples of bounded
// * width, breaking only at whitespace. Filtering happens before wrapping.

use crate::config::constants::{MAX_FRAGMENT_CHARS, MIN_FRAGMENT_CHARS, SAMPLE_WIDTH};
use serde::{Deserialize, Serialize};

/// A whitespace-bounded chunk of one fragment, the unit that gets scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSample {
    text: String,
    fragment_index: usize,
    chunk_index: usize,
}

impl TextSample {
    pub fn new(text: impl Into<String>, fragment_index: usize, chunk_index: usize) -> Self {
        Self {
            text: text.into(),
            fragment_index,
            chunk_index,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the source fragment in the input sequence
    pub fn fragment_index(&self) -> usize {
        self.fragment_index
    }

    /// Position of this chunk inside its fragment
    pub fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Configuration for fragment filtering and wrapping
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Exclusive lower bound on trimmed fragment length (characters)
    pub min_chars: usize,
    /// Exclusive upper bound on trimmed fragment length (characters)
    pub max_chars: usize,
    /// Maximum sample width (characters)
    pub width: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_chars: MIN_FRAGMENT_CHARS,
            max_chars: MAX_FRAGMENT_CHARS,
            width: SAMPLE_WIDTH,
        }
    }
}

impl ExtractionConfig {
    pub fn new(min_chars: usize, max_chars: usize, width: usize) -> Self {
        Self {
            min_chars,
            max_chars,
            width,
        }
    }
}

pub struct TextExtractor {
    config: ExtractionConfig,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Turns fragments into samples, preserving fragment order and chunk order
    pub fn extract<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<TextSample> {
        let mut samples = Vec::new();
        let mut rejected = 0usize;

        for (fragment_index, fragment) in fragments.iter().enumerate() {
            let Some(text) = self.qualify(fragment.as_ref()) else {
                rejected += 1;
                continue;
            };

            samples.extend(
                wrap_at_whitespace(text, self.config.width)
                    .into_iter()
                    .enumerate()
                    .map(|(chunk_index, chunk)| TextSample::new(chunk, fragment_index, chunk_index)),
            );
        }

        tracing::debug!(
            fragments = fragments.len(),
            rejected,
            samples = samples.len(),
            "Fragments extracted"
        );

        samples
    }

    /// Trimmed fragment if its length lies strictly between the bounds
    pub fn qualify<'a>(&self, fragment: &'a str) -> Option<&'a str> {
        let trimmed = fragment.trim();
        let len = trimmed.chars().count();
        (len > self.config.min_chars && len < self.config.max_chars).then_some(trimmed)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedy wrap into lines of at most `width` characters.
///
/// Every whitespace character becomes a space, whitespace at line edges is dropped, and
/// lines break only between words. A single word wider than `width` is kept whole on its
/// own line.
pub fn wrap_at_whitespace(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;
    let mut gap = 0usize;
    let mut chars = text.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {
            gap += 1;
        }

        let mut word = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
            word.push(c);
        }
        if word.is_empty() {
            break;
        }
        let word_len = word.chars().count();

        if line_len == 0 {
            line = word;
            line_len = word_len;
        } else if line_len + gap + word_len <= width {
            line.extend(std::iter::repeat(' ').take(gap));
            line.push_str(&word);
            line_len += gap + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line = word;
            line_len = word_len;
        }
        gap = 0;
    }

    if line_len > 0 {
        lines.push(line);
    }

    lines
}
