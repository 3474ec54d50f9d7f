use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent analysis timed out after {deadline_secs}s")]
    Timeout { deadline_secs: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from agent API")]
    UnexpectedStatus { status: u16, body: String },

    #[error("no JSON object found in agent response: {response:?}")]
    NoJson { response: String },

    #[error("failed to parse JSON from agent response: {source}")]
    Parse {
        candidate: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid agent base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
