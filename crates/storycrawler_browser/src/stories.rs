//! Enumerating the stories of a Storybook instance.

use crate::{RegistryReader, StorybookConnection, registry_defined_predicate};
use storycrawler_config::CrawlerSettings;
use storycrawler_core::{RegistryReadResult, StoryRecord};
use storycrawler_error::{CrawlerResult, NoStoriesError, RegistryError, RegistryErrorKind};
use storycrawler_interface::{BrowserPage, NavigateOptions, WaitUntil};
use tracing::{debug, info, instrument};

/// Drives one browser page through the story enumeration protocol.
///
/// The page is owned by the enumerator and borrowed mutably for each call, so
/// at most one enumeration uses it at a time.
pub struct StoriesBrowser<P: BrowserPage> {
    connection: StorybookConnection,
    page: P,
    settings: CrawlerSettings,
    reader: RegistryReader,
}

impl<P: BrowserPage> StoriesBrowser<P> {
    /// Enumerator for the Storybook at `connection`, driving `page`.
    pub fn new(connection: StorybookConnection, page: P, settings: CrawlerSettings) -> Self {
        let reader = RegistryReader::from_settings(&settings);
        Self {
            connection,
            page,
            settings,
            reader,
        }
    }

    /// The Storybook being enumerated.
    pub fn connection(&self) -> &StorybookConnection {
        &self.connection
    }

    /// The page driven by this enumerator.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Give the page back, e.g. to close it.
    pub fn into_page(self) -> P {
        self.page
    }

    /// Return every story registered in the Storybook, in registry order.
    ///
    /// Loads the base URL, then the probe iframe, waits for the page registry
    /// and reads it in whichever of the three known shapes it has. Legacy
    /// kind groups are flattened. An empty list is a valid answer.
    ///
    /// # Errors
    ///
    /// - `NavigationError` if either navigation fails or times out
    /// - `RegistryError` if the registry never appears within the configured
    ///   bound or its snapshot cannot be decoded
    /// - `NoStoriesError` if the registry exposes none of the known methods
    #[instrument(name = "stories_browser_get_stories", skip(self), fields(url = %self.connection.url()))]
    pub async fn get_stories(&mut self) -> CrawlerResult<Vec<StoryRecord>> {
        self.page
            .navigate(self.connection.url(), &NavigateOptions::default())
            .await?;

        let probe_url = self.connection.probe_url();
        let options = NavigateOptions::new(
            self.settings.navigation_timeout(),
            WaitUntil::DomContentLoaded,
        );
        self.page.navigate(&probe_url, &options).await?;
        debug!(probe_url = %probe_url, "Probe page loaded");

        self.wait_for_registry().await?;

        let stories = self
            .reader
            .read(&self.page)
            .await?
            .map(RegistryReadResult::into_stories)
            .ok_or_else(NoStoriesError::new)?;

        debug!(count = stories.len(), ?stories, "Fetched stories");
        info!(count = stories.len(), "Enumerated stories");
        Ok(stories)
    }

    async fn wait_for_registry(&self) -> CrawlerResult<()> {
        let predicate = registry_defined_predicate();
        let wait = self.page.wait_for_function(&predicate);

        match self.settings.registry_wait_timeout() {
            None => wait.await,
            Some(bound) => tokio::time::timeout(bound, wait).await.map_err(|_| {
                RegistryError::new(RegistryErrorKind::NeverAppeared {
                    timeout_ms: bound.as_millis() as u64,
                })
            })?,
        }
    }
}
