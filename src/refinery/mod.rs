// * The Refinery: raw page fragments -> classifier-sized text samples
// * HTML fragment collection plus the length filter and whitespace wrapper

pub mod extraction;
pub mod html;

// * Re-exports for convenient access
pub use extraction::{wrap_at_whitespace, ExtractionConfig, TextExtractor, TextSample};
pub use html::{fragments_from_html, fragments_with_selector};
