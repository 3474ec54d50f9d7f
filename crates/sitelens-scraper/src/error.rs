use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch website: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} fetching {url}")]
    UnexpectedStatus { status: u16, url: String },
}
