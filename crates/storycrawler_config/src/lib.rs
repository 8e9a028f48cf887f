//! Configuration for storycrawler.
//!
//! TOML files loaded with the `config` crate, layered over the defaults
//! bundled with the library.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod loader;
mod settings;

pub use loader::StorycrawlerConfig;
pub use settings::{
    BrowserSettings, BrowserSettingsBuilder, ConnectionSettings, ConnectionSettingsBuilder,
    CrawlerSettings, CrawlerSettingsBuilder,
};
