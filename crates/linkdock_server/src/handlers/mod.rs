//! HTTP request handlers.

/// Auth verification endpoint.
pub mod auth;
/// Category-related endpoints.
pub mod category;
pub(crate) mod normalize;
/// Site-related endpoints.
pub mod site;
