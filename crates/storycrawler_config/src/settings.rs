//! Configuration sections.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storycrawler_core::{CONFIGURE_POLL_INTERVAL, MAX_CONFIGURE_WAIT_COUNT, NAVIGATION_TIMEOUT};
use storycrawler_error::{ConfigError, CrawlerResult};

fn default_endpoint() -> String {
    "http://127.0.0.1:9222".to_string()
}

fn default_navigation_timeout_ms() -> u64 {
    NAVIGATION_TIMEOUT.as_millis() as u64
}

fn default_configure_poll_interval_ms() -> u64 {
    CONFIGURE_POLL_INTERVAL.as_millis() as u64
}

fn default_max_configure_wait_count() -> u32 {
    MAX_CONFIGURE_WAIT_COUNT
}

fn default_url() -> String {
    "http://localhost:6006".to_string()
}

fn default_validation_retries() -> usize {
    3
}

fn default_validation_backoff_ms() -> u64 {
    500
}

/// Where to find the browser.
///
/// ```toml
/// [browser]
/// endpoint = "http://127.0.0.1:9222"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, Builder)]
#[builder(setter(into))]
pub struct BrowserSettings {
    /// DevTools HTTP endpoint of a running Chrome/Chromium.
    #[serde(default = "default_endpoint")]
    #[builder(default = "default_endpoint()")]
    endpoint: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl BrowserSettings {
    /// Replace the DevTools endpoint, e.g. from a command-line flag.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Timing of story enumeration.
///
/// ```toml
/// [crawler]
/// navigation_timeout_ms = 60_000
/// configure_poll_interval_ms = 16
/// max_configure_wait_count = 100
/// registry_wait_timeout_ms = 120_000
/// ```
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storycrawler_config::CrawlerSettings;
///
/// let settings = CrawlerSettings::builder()
///     .registry_wait_timeout_ms(Some(5_000))
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.navigation_timeout(), Duration::from_secs(60));
/// assert_eq!(settings.registry_wait_timeout(), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, Builder)]
pub struct CrawlerSettings {
    /// Bound on each page navigation.
    #[serde(default = "default_navigation_timeout_ms")]
    #[builder(default = "default_navigation_timeout_ms()")]
    navigation_timeout_ms: u64,

    /// Delay between two reads of the `_configuring` flag.
    #[serde(default = "default_configure_poll_interval_ms")]
    #[builder(default = "default_configure_poll_interval_ms()")]
    configure_poll_interval_ms: u64,

    /// Re-checks of the `_configuring` flag before reading anyway.
    #[serde(default = "default_max_configure_wait_count")]
    #[builder(default = "default_max_configure_wait_count()")]
    max_configure_wait_count: u32,

    /// Bound on waiting for the page registry to be defined; `None` waits forever.
    #[serde(default)]
    #[builder(default)]
    registry_wait_timeout_ms: Option<u64>,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: default_navigation_timeout_ms(),
            configure_poll_interval_ms: default_configure_poll_interval_ms(),
            max_configure_wait_count: default_max_configure_wait_count(),
            registry_wait_timeout_ms: None,
        }
    }
}

impl CrawlerSettings {
    /// Creates a new settings builder.
    pub fn builder() -> CrawlerSettingsBuilder {
        CrawlerSettingsBuilder::default()
    }

    /// Bound on each page navigation.
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Delay between two reads of the `_configuring` flag.
    pub fn configure_poll_interval(&self) -> Duration {
        Duration::from_millis(self.configure_poll_interval_ms)
    }

    /// Bound on waiting for the page registry, if any.
    pub fn registry_wait_timeout(&self) -> Option<Duration> {
        self.registry_wait_timeout_ms.map(Duration::from_millis)
    }

    /// Replace the registry wait bound.
    pub fn with_registry_wait_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.registry_wait_timeout_ms = timeout_ms;
        self
    }

    /// Rejects values that would make every navigation fail immediately.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a timeout is zero.
    pub fn validate(&self) -> CrawlerResult<()> {
        if self.navigation_timeout_ms == 0 {
            return Err(ConfigError::new("navigation_timeout_ms must be greater than 0").into());
        }
        if self.registry_wait_timeout_ms == Some(0) {
            return Err(ConfigError::new(
                "registry_wait_timeout_ms must be greater than 0 when set",
            )
            .into());
        }
        Ok(())
    }
}

/// The Storybook instance to crawl.
///
/// ```toml
/// [connection]
/// url = "http://localhost:6006"
/// validation_retries = 3
/// validation_backoff_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, Builder)]
#[builder(setter(into))]
pub struct ConnectionSettings {
    /// Base URL of the Storybook server.
    #[serde(default = "default_url")]
    #[builder(default = "default_url()")]
    url: String,

    /// Retries of the reachability check before giving up.
    #[serde(default = "default_validation_retries")]
    #[builder(default = "default_validation_retries()")]
    validation_retries: usize,

    /// Initial backoff between reachability checks.
    #[serde(default = "default_validation_backoff_ms")]
    #[builder(default = "default_validation_backoff_ms()")]
    validation_backoff_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            validation_retries: default_validation_retries(),
            validation_backoff_ms: default_validation_backoff_ms(),
        }
    }
}

impl ConnectionSettings {
    /// Creates a new settings builder.
    pub fn builder() -> ConnectionSettingsBuilder {
        ConnectionSettingsBuilder::default()
    }

    /// Replace the Storybook base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}
