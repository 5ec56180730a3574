use reqwest::Client;
use tracing::debug;

use crate::error::{DocsError, Result};
use crate::settings::Settings;

/// Shared HTTP client plus the settings every backend call needs.
#[derive(Debug, Clone)]
pub struct DocsClient {
    pub http: Client,
    pub settings: Settings,
}

impl DocsClient {
    pub fn new(settings: Settings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocsError::Endpoint(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http, settings })
    }

    /// GET a documentation page and return its body.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let page_err = |source| DocsError::PageTransport {
            url: url.to_string(),
            source,
        };
        let resp = self.http.get(url).send().await.map_err(page_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DocsError::PageStatus {
                url: url.to_string(),
                status,
            });
        }
        resp.text().await.map_err(page_err)
    }
}
