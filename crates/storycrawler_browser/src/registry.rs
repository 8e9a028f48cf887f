//! Reading the page registry, waiting out the v6 configuring phase.

use crate::script::snapshot_expression;
use std::time::Duration;
use storycrawler_config::CrawlerSettings;
use storycrawler_core::{
    CONFIGURE_POLL_INTERVAL, MAX_CONFIGURE_WAIT_COUNT, RegistryReadResult, RegistrySnapshot,
};
use storycrawler_error::{CrawlerResult, RegistryError, RegistryErrorKind};
use storycrawler_interface::BrowserPage;
use tracing::{debug, instrument, trace, warn};

/// Reads the story registry of a probe page that already defines it.
///
/// A v6 registry may still be registering stories when the page becomes
/// scriptable. While its `_configuring` flag is set the reader re-checks every
/// `poll_interval`, at most `max_attempts` times; after that it reads whatever
/// the raw list holds. Running out of attempts is not an error.
///
/// Every check is a separate snapshot evaluation, so each poll costs one
/// DevTools round trip on top of `poll_interval`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storycrawler_browser::RegistryReader;
///
/// let reader = RegistryReader::default();
/// assert_eq!(reader.poll_interval(), Duration::from_millis(16));
/// assert_eq!(reader.max_attempts(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryReader {
    poll_interval: Duration,
    max_attempts: u32,
}

impl Default for RegistryReader {
    fn default() -> Self {
        Self::new(CONFIGURE_POLL_INTERVAL, MAX_CONFIGURE_WAIT_COUNT)
    }
}

impl RegistryReader {
    /// Reader that re-checks every `poll_interval`, `max_attempts` times at most.
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// Reader configured from crawler settings.
    pub fn from_settings(settings: &CrawlerSettings) -> Self {
        Self::new(
            settings.configure_poll_interval(),
            *settings.max_configure_wait_count(),
        )
    }

    /// Delay between two configuring checks.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Re-checks before reading regardless of the configuring flag.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Read the registry once it has finished configuring or the bound is hit.
    ///
    /// Returns `None` when the registry exposes none of the known methods.
    #[instrument(name = "registry_reader_read", skip(self, page))]
    pub async fn read<P>(&self, page: &P) -> CrawlerResult<Option<RegistryReadResult>>
    where
        P: BrowserPage + ?Sized,
    {
        let mut attempt = 0;

        loop {
            let force = attempt >= self.max_attempts;
            let snapshot = self.snapshot(page, force).await?;

            if !force && snapshot.is_configuring() {
                attempt += 1;
                trace!(attempt, "Registry still configuring");
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }

            if force && snapshot.configuring {
                warn!(
                    attempts = attempt,
                    "Registry still configuring after the wait bound, reading current list"
                );
            }

            debug!(version = ?snapshot.version(), attempts = attempt, "Read registry snapshot");
            return Ok(snapshot.into_read_result());
        }
    }

    async fn snapshot<P>(&self, page: &P, force: bool) -> CrawlerResult<RegistrySnapshot>
    where
        P: BrowserPage + ?Sized,
    {
        let value = page.evaluate(&snapshot_expression(force)).await?;

        serde_json::from_value(value).map_err(|e| {
            RegistryError::new(RegistryErrorKind::Malformed(e.to_string())).into()
        })
    }
}
