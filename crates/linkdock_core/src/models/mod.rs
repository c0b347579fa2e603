//! Data models for the site and category collections.

/// Category records and request payloads.
pub mod category;
/// Site records and request payloads.
pub mod site;

pub use category::Category;
pub use site::Site;
