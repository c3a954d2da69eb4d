// * Static HTML fragment extraction
// * Collects the whitespace-normalized text of every element matching the fragment selector,
// * in document order. Nested matches each yield their own fragment, as the browser source does.

use crate::config::constants::FRAGMENT_SELECTOR;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static SELECTOR_FRAGMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(FRAGMENT_SELECTOR).unwrap());

/// Fragments for the default `p, span, div` selector
pub fn fragments_from_html(html: &str) -> Vec<String> {
    collect_fragments(&Html::parse_document(html), &SELECTOR_FRAGMENTS)
}

/// Fragments for a caller-supplied CSS selector. `None` if the selector does not parse.
pub fn fragments_with_selector(html: &str, selector: &str) -> Option<Vec<String>> {
    let selector = Selector::parse(selector).ok()?;
    Some(collect_fragments(&Html::parse_document(html), &selector))
}

fn collect_fragments(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|element| normalize_text(element.text()))
        .filter(|text| !text.is_empty())
        .collect()
}

// * Joins text nodes and collapses whitespace runs to single spaces
fn normalize_text<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    pieces
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_html() -> &'static str {
        r#"
        <html>
        <head><title>Reviews</title><script>var x = "not text";</script></head>
        <body>
            <p>The hotel was lovely and the breakfast was excellent every morning.</p>
            <div class="review">
                <span>Check-in took   forever.</span>
            </div>
            <ul><li>Ignored list item</li></ul>
        </body>
        </html>
        "#
    }

    #[test]
    fn test_fragments_in_document_order() {
        let fragments = fragments_from_html(sample_html());

        assert_eq!(
            fragments,
            vec![
                "The hotel was lovely and the breakfast was excellent every morning.".to_string(),
                "Check-in took forever.".to_string(),
                "Check-in took forever.".to_string(),
            ]
        );
    }

    #[test]
    fn test_unmatched_elements_ignored() {
        let fragments = fragments_from_html(sample_html());
        assert!(fragments.iter().all(|f| !f.contains("Ignored")));
        assert!(fragments.iter().all(|f| !f.contains("not text")));
    }

    #[test]
    fn test_custom_selector() {
        let fragments = fragments_with_selector(sample_html(), "li").unwrap();
        assert_eq!(fragments, vec!["Ignored list item".to_string()]);
    }

    #[test]
    fn test_invalid_selector() {
        assert!(fragments_with_selector(sample_html(), "[[[").is_none());
    }

    #[test]
    fn test_empty_document() {
        assert!(fragments_from_html("<html><body></body></html>").is_empty());
    }
}
