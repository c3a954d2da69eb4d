// * Configuration Constants
// * Central location for all thresholds, widths and defaults of the scoring pipeline

// * Fragment length bounds in characters, both exclusive (50 and 1000 never qualify)
pub const MIN_FRAGMENT_CHARS: usize = 50;
pub const MAX_FRAGMENT_CHARS: usize = 1000;

// * Maximum width of a text sample in characters
pub const SAMPLE_WIDTH: usize = 500;

// * Hard character cap applied before classifier inference
pub const CLASSIFIER_MAX_CHARS: usize = 512;

// * Token cap for the classifier tokenizer (BERT position limit)
pub const CLASSIFIER_MAX_TOKENS: usize = 512;

// * Lexicon compound thresholds (inclusive). Negative bar is deliberately lower.
pub const LEXICON_POSITIVE_THRESHOLD: f64 = 0.1;
pub const LEXICON_NEGATIVE_THRESHOLD: f64 = -0.02;

// * Star rating thresholds (inclusive)
pub const STAR_POSITIVE_THRESHOLD: f64 = 4.0;
pub const STAR_NEGATIVE_THRESHOLD: f64 = 2.5;

// * Classifier confidence scaling per remapped label. Negative is not clamped.
pub const POSITIVE_CONFIDENCE_SCALE: f64 = 0.8;
pub const NEGATIVE_CONFIDENCE_SCALE: f64 = 1.2;
pub const NEUTRAL_CONFIDENCE_SCALE: f64 = 0.5;

// * Default pretrained 5-star model on the Hugging Face hub
pub const DEFAULT_MODEL_ID: &str = "nlptown/bert-base-multilingual-uncased-sentiment";

// * Delay after navigation so client-side rendering can settle
pub const SETTLE_DELAY_MS: u64 = 5_000;

// * Page navigation timeout in milliseconds
pub const PAGE_TIMEOUT_MS: u64 = 60_000;

// * HTTP request timeout for the static source
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// * Elements whose visible text is captured as fragments
pub const FRAGMENT_SELECTOR: &str = "p, span, div";

// * Source tags and identity placeholders written to every record
pub const WEB_SOURCE_TAG: &str = "Web";
pub const FILE_SOURCE_TAG: &str = "File";
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

// * Capture timestamp layout
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// * Exported column schema, exact names and order
pub const COLUMN_TEXT: &str = "Text";
pub const COLUMN_SENTIMENT: &str = "Sentiment";
pub const COLUMN_SOURCE: &str = "Source";
pub const COLUMN_TIMESTAMP: &str = "Date/Time";
pub const COLUMN_USER_ID: &str = "User ID";
pub const COLUMN_LOCATION: &str = "Location";
pub const COLUMN_CONFIDENCE: &str = "Confidence Score";

pub const RECORD_COLUMNS: [&str; 7] = [
    COLUMN_TEXT,
    COLUMN_SENTIMENT,
    COLUMN_SOURCE,
    COLUMN_TIMESTAMP,
    COLUMN_USER_ID,
    COLUMN_LOCATION,
    COLUMN_CONFIDENCE,
];

// * Maximum number of words kept by the word frequency view
pub const MAX_CLOUD_WORDS: usize = 500;
