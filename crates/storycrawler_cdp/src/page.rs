//! [`BrowserPage`] over a DevTools connection.

use crate::connection::{CdpConnection, CdpResult};
use crate::protocol::{EvaluateResult, NavigateResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use storycrawler_error::{
    CdpError, CdpErrorKind, CrawlerResult, NavigationError, NavigationErrorKind,
};
use storycrawler_interface::{BrowserPage, NavigateOptions, WaitUntil};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, instrument, warn};

/// Event that completes a navigation for each wait condition.
fn lifecycle_event(wait_until: WaitUntil) -> &'static str {
    match wait_until {
        WaitUntil::Load => "Page.loadEventFired",
        WaitUntil::DomContentLoaded => "Page.domContentEventFired",
    }
}

/// Promise that resolves once `predicate` is truthy, re-checked every animation frame.
fn polling_expression(predicate: &str) -> String {
    format!(
        "new Promise(resolve => {{ \
            const check = () => {{ \
                if ({predicate}) {{ resolve(true); }} else {{ requestAnimationFrame(check); }} \
            }}; \
            check(); \
        }})"
    )
}

/// A browser tab driven over the DevTools protocol.
///
/// # Example
///
/// ```no_run
/// use storycrawler_cdp::CdpBrowser;
/// use storycrawler_interface::{BrowserPage, NavigateOptions};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let browser = CdpBrowser::new("http://127.0.0.1:9222")?;
/// let page = browser.new_page().await?;
/// page.navigate("http://localhost:6006", &NavigateOptions::default()).await?;
/// let title = page.evaluate("document.title").await?;
/// println!("{}", title);
/// browser.close_page(page).await?;
/// # Ok(())
/// # }
/// ```
pub struct CdpPage {
    target_id: String,
    connection: CdpConnection,
}

impl CdpPage {
    /// Attach to the target behind `ws_url` and enable page lifecycle events.
    #[instrument(name = "cdp_page_connect", skip(target_id))]
    pub async fn connect(ws_url: &str, target_id: impl Into<String>) -> CdpResult<Self> {
        let connection = CdpConnection::connect(ws_url).await?;
        connection.call("Page.enable", json!({})).await?;

        Ok(Self {
            target_id: target_id.into(),
            connection,
        })
    }

    /// DevTools id of the underlying target.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Whether the DevTools socket is gone.
    pub fn is_closed(&self) -> bool {
        self.connection.is_closed()
    }

    /// Issue `Page.navigate` and wait for `event_name`, without a bound.
    async fn navigate_until(&self, url: &str, event_name: &str) -> CrawlerResult<()> {
        // Subscribe first so a fast lifecycle event cannot be missed.
        let mut events = self.connection.subscribe();

        let result: NavigateResult = self
            .connection
            .call_typed("Page.navigate", json!({ "url": url }))
            .await?;

        if let Some(reason) = result.error_text.filter(|text| !text.is_empty()) {
            return Err(NavigationError::new(NavigationErrorKind::Failed {
                url: url.to_string(),
                reason,
            })
            .into());
        }

        loop {
            match events.recv().await {
                Ok(event) if event.method == event_name => return Ok(()),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed DevTools events while navigating");
                }
                Err(RecvError::Closed) => {
                    return Err(CdpError::new(CdpErrorKind::ConnectionClosed).into());
                }
            }
        }
    }
}

#[async_trait]
impl BrowserPage for CdpPage {
    #[instrument(name = "cdp_page_navigate", skip(self, options), fields(wait_until = %options.wait_until()))]
    async fn navigate(&self, url: &str, options: &NavigateOptions) -> CrawlerResult<()> {
        let event_name = lifecycle_event(*options.wait_until());

        tokio::time::timeout(*options.timeout(), self.navigate_until(url, event_name))
            .await
            .map_err(|_| {
                NavigationError::new(NavigationErrorKind::Timeout {
                    url: url.to_string(),
                    timeout_ms: options.timeout().as_millis() as u64,
                })
            })??;

        debug!("Navigation complete");
        Ok(())
    }

    #[instrument(name = "cdp_page_wait_for_function", skip(self))]
    async fn wait_for_function(&self, predicate: &str) -> CrawlerResult<()> {
        self.evaluate(&polling_expression(predicate)).await?;
        Ok(())
    }

    #[instrument(name = "cdp_page_evaluate", skip(self, expression))]
    async fn evaluate(&self, expression: &str) -> CrawlerResult<Value> {
        let result: EvaluateResult = self
            .connection
            .call_typed(
                "Runtime.evaluate",
                json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                }),
            )
            .await?;

        if let Some(details) = result.exception_details {
            return Err(CdpError::new(CdpErrorKind::Evaluation(details.describe())).into());
        }

        Ok(result.result.value.unwrap_or(Value::Null))
    }
}
