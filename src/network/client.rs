use crate::config::constants::HTTP_TIMEOUT_SECS;
use crate::network::errors::FetchError;
use crate::network::source::{validate_url, FetchFuture, FragmentSource};
use crate::refinery::html::fragments_from_html;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// * Plain HTTP fragment source for pages that render without JavaScript.
pub struct StaticSource {
    inner: Client,
}

impl StaticSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self { inner: client })
    }

    // * Fetches the raw HTML body, failing on any non-success status
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let url = validate_url(url)?;
        let resp = self.inner.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}

impl FragmentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_fragments<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let html = self.fetch_html(url).await?;
            let fragments = fragments_from_html(&html);
            tracing::info!(url, fragments = fragments.len(), "Static fragments captured");
            Ok(fragments)
        })
    }
}
