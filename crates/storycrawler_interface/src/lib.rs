//! Trait definitions for storycrawler.
//!
//! [`BrowserPage`] is the seam between story enumeration and whatever drives
//! the browser; `storycrawler_cdp` provides the DevTools implementation and
//! tests provide scripted ones.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::BrowserPage;
pub use types::{NavigateOptions, NavigateOptionsBuilder, NavigateOptionsBuilderError, WaitUntil};
