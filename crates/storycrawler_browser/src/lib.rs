//! Version-adaptive story enumeration for storycrawler.
//!
//! Works against any [`BrowserPage`](storycrawler_interface::BrowserPage):
//!
//! - [`StoriesBrowser`] - Navigates to the probe page and returns the flat story list
//! - [`RegistryReader`] - Reads the page registry, waiting out the v6 configuring phase
//! - [`StorybookConnection`] - Base URL of the Storybook, with a reachability check

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod registry;
mod script;
mod stories;

pub use connection::StorybookConnection;
pub use registry::RegistryReader;
pub use script::{registry_defined_predicate, snapshot_expression};
pub use stories::StoriesBrowser;
