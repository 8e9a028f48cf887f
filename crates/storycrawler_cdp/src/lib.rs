//! Chrome DevTools Protocol pages for storycrawler.
//!
//! # Architecture
//!
//! - [`CdpBrowser`] - Finds and opens targets through the DevTools HTTP endpoint
//! - [`CdpPage`] - One tab; implements `BrowserPage`
//! - [`CdpConnection`] - WebSocket transport with command/response correlation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod browser;
mod connection;
mod page;
mod protocol;

pub use browser::CdpBrowser;
pub use connection::{CdpConnection, CdpResult};
pub use page::CdpPage;
pub use protocol::{
    BrowserVersion, CdpEvent, CdpIncoming, CdpProtocolError, CdpRequest, EvaluateResult,
    ExceptionDetails, NavigateResult, RemoteObject, TargetInfo,
};
