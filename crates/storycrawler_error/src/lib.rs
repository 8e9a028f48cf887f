//! Error types for the storycrawler library.
//!
//! This crate provides the foundation error types used throughout the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storycrawler_error::{CrawlerResult, JsonError};
//!
//! fn decode_snapshot() -> CrawlerResult<String> {
//!     Err(JsonError::new("expected an object"))?
//! }
//!
//! assert!(decode_snapshot().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cdp;
mod config;
mod connection;
mod error;
mod json;
mod navigation;
mod no_stories;
mod registry;

pub use cdp::{CdpError, CdpErrorKind};
pub use config::ConfigError;
pub use connection::{ConnectionError, ConnectionErrorKind};
pub use error::{CrawlerError, CrawlerErrorKind, CrawlerResult};
pub use json::JsonError;
pub use navigation::{NavigationError, NavigationErrorKind};
pub use no_stories::NoStoriesError;
pub use registry::{RegistryError, RegistryErrorKind};
