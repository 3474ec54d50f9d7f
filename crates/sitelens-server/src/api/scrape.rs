use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{validate_url, ApiError, AppState, ProfileResponse};

#[derive(Debug, Default, Deserialize)]
pub(super) struct ScrapeRequest {
    url: Option<String>,
}

/// `POST /scrape-website` — the deterministic heuristic path.
///
/// Fetches the page directly and pattern-matches the profile fields out of
/// its markup. Standalone alternative to the agent path for callers that
/// hit its timeout or want a cheap, reproducible answer; does not touch the
/// cache, which exists to bound load on the agent service only.
pub(super) async fn scrape_website(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    request: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    // A missing or unparseable body reads the same as a missing URL, so
    // every validation failure carries the response envelope.
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let url = validate_url(request.url.as_deref())?;

    let data = sitelens_scraper::scrape_profile(&state.pages, &url)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, %url, error = %e, "page scrape failed");
            ApiError::internal(e.to_string())
        })?;

    tracing::info!(request_id = %req_id.0, %url, "scraped profile from markup");

    Ok(Json(ProfileResponse {
        success: true,
        data,
        cached: false,
    }))
}
