//! Auth verification handler.

use crate::{auth, error::HttpError, AppState};
use axum::{extract::State, http::HeaderMap, Json};
use serde_json::json;

/// Verify the caller's admin token.
///
/// # Errors
/// 401 unless the bearer token matches the configured admin key; an
/// unconfigured key always denies.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, HttpError> {
    auth::require_admin(&state.config, &headers)?;
    Ok(Json(json!({ "ok": true })))
}
