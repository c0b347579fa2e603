//! Category HTTP handlers.

use super::normalize::{required_field, trimmed_or_empty, trimmed_preserving_presence};
use crate::{auth, error::HttpError, AppState};
use axum::{extract::State, http::HeaderMap, Json};
use linkdock_core::models::category::{
    AddCategoryRequest, CategoryUpdate, DeleteCategoryRequest, UpdateCategoryRequest,
};
use linkdock_core::AppError;
use serde_json::json;

/// List all categories, normalized, in a `{"categories": ...}` envelope.
/// Open to unauthenticated readers: the public directory renders from it.
///
/// # Errors
/// Returns an error when the store lookup fails.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let categories = state.db.list_categories()?;
    Ok(Json(json!({ "categories": categories })))
}

/// Add a category, or refresh the description of an existing one.
///
/// # Errors
/// 400 when `name` is missing.
pub async fn add_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AddCategoryRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    auth::require_admin(&state.config, &headers)?;

    let name = required_field(req.name)
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
    state.db.add_category(name, trimmed_or_empty(req.desc))?;
    Ok(Json(json!({ "ok": true })))
}

/// Rename a category and/or update its description.
///
/// A rename propagates to referencing sites unless `updateSites` is false.
///
/// # Errors
/// 400 when `name` is missing, 404 when the category does not exist, 409
/// when the new name is already taken.
pub async fn update_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    auth::require_admin(&state.config, &headers)?;

    let name = required_field(req.name)
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
    let update = CategoryUpdate {
        new_name: required_field(req.new_name),
        desc: trimmed_preserving_presence(req.desc),
        update_sites: req.update_sites.unwrap_or(true),
    };
    state.db.update_category(&name, update)?;
    Ok(Json(json!({ "ok": true })))
}

/// Delete a category, clearing it from every referencing site.
///
/// # Errors
/// 400 when `name` is missing, 404 when the category does not exist.
pub async fn delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<DeleteCategoryRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    auth::require_admin(&state.config, &headers)?;

    let name = required_field(req.name)
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
    state.db.delete_category(&name)?;
    Ok(Json(json!({ "ok": true })))
}
