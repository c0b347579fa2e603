//! Site HTTP handlers.

use super::normalize::{required_field, trimmed_or_empty, trimmed_preserving_presence};
use crate::{auth, error::HttpError, AppState};
use axum::{extract::State, http::HeaderMap, Json};
use linkdock_core::models::site::{
    AddSiteRequest, NewSite, Site, SiteIdRequest, SiteUpdate, UpdateSiteRequest,
};
use linkdock_core::AppError;
use serde_json::json;

/// List all sites (admin view).
///
/// # Errors
/// Returns an error when auth or the store lookup fails.
pub async fn list_sites(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Site>>, HttpError> {
    auth::require_admin(&state.config, &headers)?;
    let sites = state.db.list_sites()?;
    Ok(Json(sites))
}

/// List all sites for the public directory, in a `{"sites": ...}` envelope.
///
/// # Errors
/// Returns an error when the store lookup fails.
pub async fn public_sites(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let sites = state.db.list_sites()?;
    Ok(Json(json!({ "sites": sites })))
}

/// Add a new site.
///
/// # Errors
/// 400 when `title` or `url` is missing or the category is unknown, 409 on a
/// duplicate id or url.
pub async fn add_site(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AddSiteRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    auth::require_admin(&state.config, &headers)?;

    let title = trimmed_or_empty(req.title);
    let url = trimmed_or_empty(req.url);
    if title.is_empty() || url.is_empty() {
        return Err(AppError::BadRequest("title and url are required".to_string()).into());
    }

    let draft = NewSite {
        id: required_field(req.id),
        title,
        url,
        description: trimmed_or_empty(req.description),
        is_public: req.is_public.unwrap_or(true),
        category: trimmed_or_empty(req.category),
    };
    let id = state.db.add_site(draft)?;
    Ok(Json(json!({ "ok": true, "id": id })))
}

/// Apply a partial update to a site.
///
/// # Errors
/// 400 when `id` is missing or the category is unknown, 404 when the site
/// does not exist, 409 on a url collision.
pub async fn update_site(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateSiteRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    auth::require_admin(&state.config, &headers)?;

    let id = required_field(req.id)
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    let update = SiteUpdate {
        title: trimmed_preserving_presence(req.title),
        url: trimmed_preserving_presence(req.url),
        description: trimmed_preserving_presence(req.description),
        category: trimmed_preserving_presence(req.category),
    };
    state.db.update_site(&id, update)?;
    Ok(Json(json!({ "ok": true })))
}

/// Delete a site by id.
///
/// # Errors
/// 400 when `id` is missing, 404 when the site does not exist.
pub async fn delete_site(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SiteIdRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    auth::require_admin(&state.config, &headers)?;

    let id = required_field(req.id)
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    state.db.delete_site(&id)?;
    Ok(Json(json!({ "ok": true })))
}

/// Record a click on a site. Not auth-gated: the public directory calls this
/// on every outbound navigation.
///
/// # Errors
/// 400 when `id` is missing, 404 when the site does not exist.
pub async fn click_site(
    State(state): State<AppState>,
    Json(req): Json<SiteIdRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let id = required_field(req.id)
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    let clicks = state.db.click_site(&id)?;
    Ok(Json(json!({ "ok": true, "clicks": clicks })))
}
