//! Trait definitions for the browser page seam.

use crate::NavigateOptions;
use async_trait::async_trait;
use storycrawler_error::CrawlerResult;

/// A navigable browser page.
///
/// The story enumerator depends on these three operations only. A page holds
/// navigation state, so one page must not serve two enumerations at once;
/// callers hold it behind `&mut` for the duration of a crawl.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Navigate to `url` and wait for the configured lifecycle event.
    ///
    /// Fails with a `NavigationError` when the event does not fire within the
    /// timeout or the browser aborts the navigation.
    async fn navigate(&self, url: &str, options: &NavigateOptions) -> CrawlerResult<()>;

    /// Wait until the JavaScript `predicate` expression is truthy in the page.
    ///
    /// The wait itself has no upper bound; callers that need one wrap the
    /// returned future in a timeout.
    async fn wait_for_function(&self, predicate: &str) -> CrawlerResult<()>;

    /// Evaluate a JavaScript expression and return its JSON value.
    ///
    /// Promises are awaited. The result must be JSON-serializable.
    async fn evaluate(&self, expression: &str) -> CrawlerResult<serde_json::Value>;
}
