//! Target discovery over the DevTools HTTP endpoint.

use crate::connection::CdpResult;
use crate::page::CdpPage;
use crate::protocol::{BrowserVersion, TargetInfo};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use storycrawler_error::{CdpError, CdpErrorKind};
use tracing::{debug, info, instrument};

/// An already-running Chrome/Chromium reachable on its remote debugging port.
///
/// Launching the browser is left to the caller, e.g.
/// `chromium --headless=new --remote-debugging-port=9222`.
#[derive(Debug, Clone)]
pub struct CdpBrowser {
    endpoint: Url,
    client: Client,
}

impl CdpBrowser {
    /// Use the DevTools HTTP endpoint at `endpoint` (e.g. `http://127.0.0.1:9222`).
    pub fn new(endpoint: &str) -> CdpResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            CdpError::new(CdpErrorKind::Discovery(format!(
                "Invalid DevTools endpoint {}: {}",
                endpoint, e
            )))
        })?;

        Ok(Self {
            endpoint,
            client: Client::new(),
        })
    }

    /// The DevTools HTTP endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Product and protocol version of the browser.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn version(&self) -> CdpResult<BrowserVersion> {
        let url = self.url("json/version")?;
        self.fetch(self.client.get(url)).await
    }

    /// Open a blank tab and attach to it.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn new_page(&self) -> CdpResult<CdpPage> {
        let url = self.url("json/new?about:blank")?;
        let target: TargetInfo = self.fetch(self.client.put(url)).await?;

        debug!(target_id = %target.id, "Created DevTools target");

        let page = CdpPage::connect(&target.web_socket_debugger_url, target.id).await?;
        info!(target_id = page.target_id(), "Attached to new page");
        Ok(page)
    }

    /// Close the tab behind `page`.
    #[instrument(skip(self, page), fields(target_id = page.target_id()))]
    pub async fn close_page(&self, page: CdpPage) -> CdpResult<()> {
        let url = self.url(&format!("json/close/{}", page.target_id()))?;
        drop(page);

        self.client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CdpError::new(CdpErrorKind::Discovery(e.to_string())))?;

        debug!("Closed DevTools target");
        Ok(())
    }

    fn url(&self, path: &str) -> CdpResult<Url> {
        self.endpoint.join(path).map_err(|e| {
            CdpError::new(CdpErrorKind::Discovery(format!(
                "Invalid DevTools path {}: {}",
                path, e
            )))
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> CdpResult<T> {
        request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CdpError::new(CdpErrorKind::Discovery(e.to_string())))?
            .json()
            .await
            .map_err(|e| CdpError::new(CdpErrorKind::InvalidMessage(e.to_string())))
    }
}
