//! Storycrawler - Storybook story enumeration
//!
//! Storycrawler drives a real browser page to the Storybook story iframe and
//! reads the page-global `__STORYBOOK_CLIENT_API__` registry. Storybook 4
//! (`getStorybook`), 5 (`raw`) and 6 (`raw` + `store`, with its asynchronous
//! configuring phase) are all normalized into one flat list of
//! [`StoryRecord`]s.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storycrawler::{StorycrawlerConfig, crawl_stories};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorycrawlerConfig::load()?;
//!     for story in crawl_stories(&config).await? {
//!         println!("{} / {}", story.kind, story.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storycrawler_core` - Story records, registry shapes, flattening
//! - `storycrawler_interface` - `BrowserPage` trait
//! - `storycrawler_error` - Error types
//! - `storycrawler_config` - TOML configuration
//! - `storycrawler_cdp` - Chrome DevTools Protocol pages
//! - `storycrawler_browser` - The enumeration protocol
//!
//! This crate (`storycrawler`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use storycrawler_browser::*;
pub use storycrawler_cdp::*;
pub use storycrawler_config::*;
pub use storycrawler_core::*;
pub use storycrawler_error::*;
pub use storycrawler_interface::*;

use tracing::{info, instrument, warn};

/// Enumerate the stories of the configured Storybook in a fresh browser tab.
///
/// Checks that the Storybook answers, opens a tab on the configured DevTools
/// endpoint, runs the enumeration and closes the tab again, also on failure.
///
/// # Errors
///
/// Returns the first error of the reachability check, target discovery or
/// the enumeration itself. A failure to close the tab is only logged.
#[instrument(skip(config), fields(url = %config.connection.url()))]
pub async fn crawl_stories(config: &StorycrawlerConfig) -> CrawlerResult<Vec<StoryRecord>> {
    let connection = StorybookConnection::new(config.connection.url())?;
    connection.validate(&config.connection).await?;

    let browser = CdpBrowser::new(config.browser.endpoint())?;
    let page = browser.new_page().await?;

    let mut enumerator = StoriesBrowser::new(connection, page, config.crawler.clone());
    let result = enumerator.get_stories().await;

    if let Err(e) = browser.close_page(enumerator.into_page()).await {
        warn!(error = %e, "Failed to close browser tab");
    }

    if let Ok(stories) = &result {
        info!(count = stories.len(), "Crawl complete");
    }
    result
}
