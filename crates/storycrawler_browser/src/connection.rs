//! The Storybook instance being crawled.

use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use storycrawler_config::ConnectionSettings;
use storycrawler_core::PROBE_PATH;
use storycrawler_error::{ConnectionError, ConnectionErrorKind, CrawlerResult};
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, info, instrument, warn};

const MAX_VALIDATION_DELAY: Duration = Duration::from_secs(10);

/// Base URL of a running Storybook server.
///
/// # Examples
///
/// ```
/// use storycrawler_browser::StorybookConnection;
///
/// let connection = StorybookConnection::new("http://localhost:6006/").unwrap();
/// assert_eq!(connection.url(), "http://localhost:6006");
/// assert_eq!(
///     connection.probe_url(),
///     "http://localhost:6006/iframe.html?selectedKind=story-crawler-kind&selectedStory=story-crawler-story"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorybookConnection {
    url: String,
}

impl StorybookConnection {
    /// Describe the Storybook server at `url`. Trailing slashes are dropped.
    ///
    /// # Errors
    ///
    /// Returns a `ConnectionError` if `url` is not an absolute URL.
    pub fn new(url: &str) -> CrawlerResult<Self> {
        let trimmed = url.trim().trim_end_matches('/');

        Url::parse(trimmed).map_err(|e| {
            ConnectionError::new(ConnectionErrorKind::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
        })?;

        Ok(Self {
            url: trimmed.to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The story iframe with a kind/story pair that selects nothing.
    pub fn probe_url(&self) -> String {
        format!("{}{}", self.url, PROBE_PATH)
    }

    /// Check that the server answers, retrying with exponential backoff.
    ///
    /// Transport errors and 5xx answers are retried up to
    /// `validation_retries` times; any other non-success status fails at once.
    ///
    /// # Errors
    ///
    /// Returns a `ConnectionError` if the server stays unreachable or rejects
    /// the request.
    #[instrument(skip(self, settings), fields(url = %self.url))]
    pub async fn validate(&self, settings: &ConnectionSettings) -> CrawlerResult<()> {
        let client = Client::new();

        let retry_strategy = ExponentialBackoff::from_millis(*settings.validation_backoff_ms())
            .factor(2)
            .max_delay(MAX_VALIDATION_DELAY)
            .map(jitter)
            .take(*settings.validation_retries());

        Retry::spawn(retry_strategy, || {
            let client = client.clone();
            let url = self.url.clone();
            async move {
                match probe(&client, &url).await {
                    Ok(()) => Ok(()),
                    Err(e) if is_transient(&e) => {
                        warn!(error = %e, "Storybook server not ready, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::Permanent(e)),
                }
            }
        })
        .await?;

        info!("Storybook server is reachable");
        Ok(())
    }
}

async fn probe(client: &Client, url: &str) -> Result<(), ConnectionError> {
    let response = client.get(url).send().await.map_err(|e| {
        ConnectionError::new(ConnectionErrorKind::Unreachable {
            url: url.to_string(),
            reason: e.to_string(),
        })
    })?;

    let status = response.status();
    debug!(status = status.as_u16(), "Storybook server answered");

    if status.is_success() {
        Ok(())
    } else {
        Err(ConnectionError::new(ConnectionErrorKind::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        }))
    }
}

fn is_transient(error: &ConnectionError) -> bool {
    match &error.kind {
        ConnectionErrorKind::Unreachable { .. } => true,
        ConnectionErrorKind::Status { status_code, .. } => StatusCode::from_u16(*status_code)
            .map(|status| status.is_server_error())
            .unwrap_or(false),
        ConnectionErrorKind::InvalidUrl { .. } => false,
    }
}
