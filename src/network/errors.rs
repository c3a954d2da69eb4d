use thiserror::Error;

// * Unified error for fetching page fragments. One error covers the whole URL;
// * fragments read before the failure are discarded.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Page navigation failed: {0}")]
    Navigation(String),

    #[error("Page timeout after {0}ms")]
    Timeout(u64),

    #[error("Content extraction failed: {0}")]
    ContentExtraction(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),
}
