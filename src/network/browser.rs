// * Headless browser fragment source
// * Renders JavaScript-heavy pages with ChromiumOxide, waits for the page to settle, then reads
// * the visible text of every element matching the fragment selector.

use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::constants::{FRAGMENT_SELECTOR, PAGE_TIMEOUT_MS, SETTLE_DELAY_MS};
use crate::network::errors::FetchError;
use crate::network::source::{validate_url, FetchFuture, FragmentSource};

/// Configuration for the browser source
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Wait after navigation so client-side content can render
    pub settle_delay_ms: u64,
    /// Navigation timeout
    pub page_timeout_ms: u64,
    /// CSS selector whose elements become fragments
    pub selector: String,
    /// Run without a visible window
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: SETTLE_DELAY_MS,
            page_timeout_ms: PAGE_TIMEOUT_MS,
            selector: FRAGMENT_SELECTOR.to_string(),
            headless: true,
        }
    }
}

// * Launches one browser per fetch and always tears it down
pub struct BrowserSource {
    config: BrowserConfig,
}

impl BrowserSource {
    pub fn new() -> Self {
        Self::with_config(BrowserConfig::default())
    }

    pub fn with_config(config: BrowserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    async fn launch(&self) -> Result<(Browser, tokio::task::JoinHandle<()>), FetchError> {
        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if !self.config.headless {
            builder = builder.with_head();
        }
        let chrome_config = builder.build().map_err(FetchError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| FetchError::BrowserLaunch(e.to_string()))?;

        // * The CDP handler must be polled for the browser to make progress
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("Browser launched");
        Ok((browser, handle))
    }

    async fn read_page(&self, browser: &Browser, url: &str) -> Result<Vec<String>, FetchError> {
        let timeout = Duration::from_millis(self.config.page_timeout_ms);
        let page = match tokio::time::timeout(timeout, browser.new_page(url)).await {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => return Err(FetchError::Navigation(e.to_string())),
            Err(_) => return Err(FetchError::Timeout(self.config.page_timeout_ms)),
        };

        // * Let client-side rendering settle before reading
        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        let fragments = self.collect_text(&page).await;
        let _ = page.close().await;
        fragments
    }

    async fn collect_text(&self, page: &Page) -> Result<Vec<String>, FetchError> {
        let elements = page
            .find_elements(self.config.selector.as_str())
            .await
            .map_err(|e| FetchError::ContentExtraction(e.to_string()))?;

        let mut fragments = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element
                .inner_text()
                .await
                .map_err(|e| FetchError::ContentExtraction(e.to_string()))?;
            fragments.push(text.unwrap_or_default());
        }
        Ok(fragments)
    }
}

impl Default for BrowserSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentSource for BrowserSource {
    fn name(&self) -> &str {
        "browser"
    }

    fn fetch_fragments<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let url = validate_url(url)?;
            let (mut browser, handler) = self.launch().await?;

            let result = self.read_page(&browser, url.as_str()).await;

            if let Err(e) = browser.close().await {
                warn!(error = %e, "Browser close failed");
            }
            let _ = browser.wait().await;
            handler.abort();

            match &result {
                Ok(fragments) => info!(url = %url, fragments = fragments.len(), "Page fragments captured"),
                Err(e) => warn!(url = %url, error = %e, "Page fetch failed"),
            }
            result
        })
    }
}
