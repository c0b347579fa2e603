//! Bearer-token admin gate.

use axum::http::{header, HeaderMap};
use linkdock_core::{AppError, Config};

/// Extract the bearer token from an `Authorization` header.
///
/// A header without the `Bearer ` prefix is treated as the bare token.
pub fn bearer_token(headers: &HeaderMap) -> &str {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    value.strip_prefix("Bearer ").unwrap_or(value)
}

/// Require a token matching the configured admin key.
///
/// An unconfigured key denies every request regardless of token.
///
/// # Errors
/// [`AppError::Unauthorized`] on any mismatch.
pub fn require_admin(config: &Config, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(key) = config.admin_key.as_deref() else {
        return Err(AppError::Unauthorized);
    };
    let token = bearer_token(headers);
    if token.is_empty() || token != key {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
