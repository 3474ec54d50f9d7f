//! Heuristic page-metadata extraction.
//!
//! The deterministic fallback to agent analysis: fetch the raw markup and
//! derive the same business-profile fields by pattern matching alone. Field
//! extraction never fails; a field that cannot be found is simply absent.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod types;

pub use error::ScrapeError;
pub use extract::extract_metadata;
pub use fetch::PageClient;
pub use types::{PageMetadata, SocialLinks};

use sitelens_core::BusinessProfile;

/// Fetches `url` and derives a [`BusinessProfile`] from its markup.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the page cannot be retrieved. Extraction
/// itself never fails.
pub async fn scrape_profile(
    client: &PageClient,
    url: &str,
) -> Result<BusinessProfile, ScrapeError> {
    let html = client.fetch(url).await?;
    let metadata = extract_metadata(&html);
    tracing::debug!(
        url,
        has_title = !metadata.title.is_empty(),
        has_email = metadata.email.is_some(),
        "extracted page metadata"
    );
    Ok(metadata.into_profile(url))
}
