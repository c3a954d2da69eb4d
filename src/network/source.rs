// * Upstream collaborator seam: anything that turns a URL into an ordered list of
// * raw text fragments, one per matched page element.

use crate::network::errors::FetchError;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Type alias for the boxed fetch future
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<String>, FetchError>> + Send + 'a>>;

pub trait FragmentSource: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Fetches the visible text fragments of `url` in document order
    fn fetch_fragments<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// Rejects anything that is not an absolute http(s) URL
pub fn validate_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!("{raw}: unsupported scheme '{other}'"))),
    }
}

/// Fixed fragments, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticFragments {
    fragments: Vec<String>,
}

impl StaticFragments {
    pub fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }
}

impl FragmentSource for StaticFragments {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch_fragments<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            validate_url(url)?;
            Ok(self.fragments.clone())
        })
    }
}
