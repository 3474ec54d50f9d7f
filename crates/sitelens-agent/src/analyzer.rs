//! Timeout-bounded orchestration of one agent analysis.

use std::time::Duration;

use sitelens_core::BusinessProfile;

use crate::client::AgentClient;
use crate::error::AgentError;
use crate::extract::extract_profile;
use crate::prompt::build_prompt;

/// Orchestrator racing the external extraction call against a hard
/// wall-clock deadline.
///
/// The race is `tokio::time::timeout`, so the losing call future is dropped
/// when the deadline wins; dropping it tears down the in-flight HTTP request
/// rather than leaving it running to completion. The service may still do
/// work on its side for a request whose connection went away.
pub struct Analyzer {
    client: AgentClient,
    deadline_secs: u64,
}

impl Analyzer {
    #[must_use]
    pub fn new(client: AgentClient, deadline_secs: u64) -> Self {
        Self {
            client,
            deadline_secs,
        }
    }

    /// Runs one bounded analysis for `url` and parses the service's answer
    /// into a [`BusinessProfile`].
    ///
    /// # Errors
    ///
    /// - [`AgentError::Timeout`] if the call has not completed within the
    ///   deadline; the caller gets control back at the deadline, never later.
    /// - [`AgentError::Http`] / [`AgentError::UnexpectedStatus`] if the
    ///   service call itself fails.
    /// - [`AgentError::NoJson`] / [`AgentError::Parse`] if the call succeeds
    ///   but its output cannot be turned into a record.
    pub async fn analyze(&self, url: &str) -> Result<BusinessProfile, AgentError> {
        let prompt = build_prompt(url);

        tracing::info!(url, deadline_secs = self.deadline_secs, "starting agent analysis");

        let deadline = Duration::from_secs(self.deadline_secs);
        let raw = match tokio::time::timeout(deadline, self.client.generate(&prompt)).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(url, deadline_secs = self.deadline_secs, "agent analysis timed out");
                return Err(AgentError::Timeout {
                    deadline_secs: self.deadline_secs,
                });
            }
        };

        tracing::debug!(url, response_len = raw.len(), "agent response received");

        extract_profile(&raw)
    }
}
