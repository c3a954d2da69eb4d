// * Upstream fragment sources
// * A fetch either yields the page's fragments or fails as a whole

pub mod browser;
pub mod client;
pub mod errors;
pub mod source;

// * Re-exports for convenient access
pub use browser::{BrowserConfig, BrowserSource};
pub use client::StaticSource;
pub use errors::FetchError;
pub use source::{validate_url, FetchFuture, FragmentSource, StaticFragments};
