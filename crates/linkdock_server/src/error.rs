//! HTTP error mapping for API handlers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use linkdock_core::AppError;
use serde_json::json;

/// Wrapper adapting [`AppError`] to HTTP responses.
///
/// Bodies are a JSON envelope `{"error": "<code>"}` with stable code strings;
/// any detail in the error itself goes to the log, not the client.
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(msg) => {
                tracing::debug!("bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::UnknownCategory(name) => {
                tracing::debug!("unknown category: '{}'", name);
                (StatusCode::BAD_REQUEST, "unknown_category")
            }
            AppError::Conflict(msg) => {
                tracing::debug!("conflict: {}", msg);
                (StatusCode::CONFLICT, "conflict")
            }
            other => {
                tracing::error!("internal error: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
            }
        };

        (status, Json(json!({ "error": code }))).into_response()
    }
}

/// Give wrong-method responses the same JSON envelope as handler errors.
///
/// The method routers reject mismatched verbs with an empty-bodied 405; this
/// response mapper rewrites those into `{"error": "method_not_allowed"}`
/// while keeping the `Allow` header the router set.
pub async fn method_not_allowed_envelope(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let mut rewritten = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "method_not_allowed" })),
    )
        .into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rewritten
}
