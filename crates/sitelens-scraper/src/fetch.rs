//! Page retrieval for the heuristic extraction path.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

/// HTTP client for fetching raw page markup.
///
/// Carries its own total request timeout: the heuristic path has no
/// orchestrator-level deadline above it, so the bound lives here.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the body of `url` as text.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] on network failure or timeout.
    /// - [`ScrapeError::UnexpectedStatus`] on any non-2xx response.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "page fetch returned non-2xx");
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
