//! Loading page HTML from its source.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;
use vocab_protocols::{ExtractError, PageSource};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads raw HTML for a [`PageSource`].
#[derive(Debug, Clone)]
pub struct PageLoader {
    client: Client,
}

impl PageLoader {
    pub fn new() -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("vocab-helper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExtractError::Fetch(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Read the page markup. Non-UTF-8 bytes are replaced.
    pub async fn load(&self, source: &PageSource) -> Result<String, ExtractError> {
        match source {
            PageSource::Html(html) => Ok(html.clone()),
            PageSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                debug!(path = %path.display(), bytes = bytes.len(), "Loaded page from file");
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            PageSource::Url(raw) => self.fetch(raw).await,
        }
    }

    async fn fetch(&self, raw: &str) -> Result<String, ExtractError> {
        let url = Url::parse(raw)
            .map_err(|e| ExtractError::SourceUnavailable(format!("Invalid URL '{}': {}", raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ExtractError::SourceUnavailable(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ExtractError::Fetch(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Fetch(format!("{} returned {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Fetch(format!("Failed to read body: {}", e)))?;
        debug!(url = %url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
