// * Word frequencies behind the word cloud
// * Lowercase, strip everything that is not an ASCII letter or whitespace, drop stopwords.

use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static NON_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "cannot", "com", "could", "couldn", "did",
        "didn", "do", "does", "doesn", "doing", "don", "down", "during", "each", "else", "ever",
        "few", "for", "from", "further", "get", "had", "hadn", "has", "hasn", "have", "haven",
        "having", "he", "hence", "her", "here", "hers", "herself", "him", "himself", "his",
        "how", "however", "http", "i", "if", "in", "into", "is", "isn", "it", "its", "itself",
        "just", "k", "like", "ll", "me", "more", "most", "mustn", "my", "myself", "no", "nor",
        "not", "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our",
        "ours", "ourselves", "out", "over", "own", "r", "re", "same", "shall", "shan", "she",
        "should", "shouldn", "since", "so", "some", "such", "than", "that", "the", "their",
        "theirs", "them", "themselves", "then", "there", "therefore", "these", "they", "this",
        "those", "through", "to", "too", "under", "until", "up", "very", "ve", "was", "wasn",
        "we", "were", "weren", "what", "when", "where", "which", "while", "who", "whom", "why",
        "with", "won", "would", "wouldn", "www", "you", "your", "yours", "yourself",
        "yourselves",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Lowercased text with every non-letter, non-whitespace character removed
pub fn clean_text(text: &str) -> String {
    NON_LETTERS.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Most frequent non-stopwords across all texts, highest count first, ties alphabetical
pub fn word_frequencies<'a>(texts: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<WordCount> {
    let joined = texts.into_iter().collect::<Vec<_>>().join(" ");
    let cleaned = clean_text(&joined);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in cleaned.split_whitespace().filter(|w| !is_stopword(w)) {
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_non_letters() {
        assert_eq!(clean_text("Great!! 10/10, would-return"), "great  wouldreturn");
    }

    #[test]
    fn test_frequencies_ranked_without_stopwords() {
        let texts = ["The pool was great", "Great staff, great pool!", "the room"];
        let words = word_frequencies(texts, 10);

        assert_eq!(words[0], WordCount { word: "great".into(), count: 3 });
        assert_eq!(words[1], WordCount { word: "pool".into(), count: 2 });
        assert!(words.iter().all(|w| w.word != "the" && w.word != "was"));
    }

    #[test]
    fn test_limit_applied() {
        let texts = ["alpha beta gamma delta epsilon"];
        assert_eq!(word_frequencies(texts, 2).len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(word_frequencies(Vec::<&str>::new(), 500).is_empty());
    }
}
