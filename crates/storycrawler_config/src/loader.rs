//! Layered TOML configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`include_str!` of `storycrawler.toml`)
//! 2. `~/.config/storycrawler/storycrawler.toml`
//! 3. `./storycrawler.toml`

use crate::{BrowserSettings, ConnectionSettings, CrawlerSettings};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use storycrawler_error::{ConfigError, CrawlerError, CrawlerResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storycrawler.toml");

/// Top-level storycrawler configuration.
///
/// # Example
///
/// ```no_run
/// use storycrawler_config::StorycrawlerConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StorycrawlerConfig::load()?;
/// println!("Crawling {}", config.connection.url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct StorycrawlerConfig {
    /// Browser endpoint
    #[serde(default)]
    pub browser: BrowserSettings,

    /// Enumeration timing
    #[serde(default)]
    pub crawler: CrawlerSettings,

    /// Target Storybook instance
    #[serde(default)]
    pub connection: ConnectionSettings,
}

impl StorycrawlerConfig {
    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file does not parse.
    pub fn bundled() -> CrawlerResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CrawlerResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file fails to parse.
    #[instrument]
    pub fn load() -> CrawlerResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storycrawler/storycrawler.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storycrawler").required(false));

        Self::finish(builder)
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> CrawlerResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                CrawlerError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CrawlerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.crawler.validate()?;
        Ok(config)
    }
}
