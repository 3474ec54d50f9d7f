use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use sitelens_core::cache_key;

use crate::middleware::RequestId;

use super::{validate_url, ApiError, AppState, ProfileResponse};

#[derive(Debug, Default, Deserialize)]
pub(super) struct AnalyzeRequest {
    url: Option<String>,
}

/// `POST /analyze-website` — the agent-backed extraction path.
///
/// Looks the normalized URL up in the cache first; on a miss, runs one
/// timeout-bounded agent analysis and stores the result. Two concurrent
/// requests for the same key before either completes will both pay the
/// agent call; the cache bounds repeat load, not in-flight duplication.
pub(super) async fn analyze_website(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    // A missing or unparseable body reads the same as a missing URL, so
    // every validation failure carries the response envelope.
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let url = validate_url(request.url.as_deref())?;
    let key = cache_key(&url);

    if let Some(data) = state.cache.get(&key) {
        tracing::info!(request_id = %req_id.0, %url, cache_key = %key, "serving cached profile");
        return Ok(Json(ProfileResponse {
            success: true,
            data,
            cached: true,
        }));
    }

    let data = state.analyzer.analyze(&url).await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, %url, error = %e, "agent analysis failed");
        ApiError::internal(format!("Failed to analyze website: {e}"))
    })?;

    state.cache.set(&key, data.clone());
    tracing::info!(request_id = %req_id.0, %url, cache_key = %key, "stored fresh profile");

    Ok(Json(ProfileResponse {
        success: true,
        data,
        cached: false,
    }))
}
