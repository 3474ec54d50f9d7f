//! HTTP client for the external extraction service's responses API.
//!
//! Wraps `reqwest` with bearer-token auth and typed error handling. The
//! client carries no total request timeout of its own; the hard wall-clock
//! deadline is enforced one level up by [`crate::Analyzer`], so a single
//! bound governs the whole analysis.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use crate::error::AgentError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the extraction service.
///
/// Use [`AgentClient::new`] for production or [`AgentClient::with_base_url`]
/// to point at a mock server in tests.
pub struct AgentClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

/// The slice of the service's response envelope we consume: the free-text
/// answer. Anything else in the envelope is ignored.
#[derive(Debug, Deserialize)]
struct AgentResponse {
    #[serde(default)]
    content: String,
}

impl AgentClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str) -> Result<Self, AgentError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AgentError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self, AgentError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("sitelens/0.1 (business-profile-extraction)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joins append to the path rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AgentError::InvalidBaseUrl {
            base_url: normalised.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    /// Sends one task prompt to the service and returns its free-text answer.
    ///
    /// The request enables the service's `web_search` tool so it can browse
    /// the target page itself.
    ///
    /// # Errors
    ///
    /// - [`AgentError::Http`] on network or TLS failure, or if the response
    ///   body is not valid JSON. Any JSON object deserializes; a missing
    ///   `content` field reads as an empty answer.
    /// - [`AgentError::UnexpectedStatus`] on any non-2xx response.
    pub async fn generate(&self, input: &str) -> Result<String, AgentError> {
        let url = self
            .base_url
            .join("responses")
            .map_err(|e| AgentError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let body = json!({
            "model": self.model,
            "tools": [{ "type": "web_search" }],
            "input": input,
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: AgentResponse = response.json().await?;
        Ok(envelope.content)
    }
}
