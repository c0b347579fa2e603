//! Site-related data models.

use serde::{Deserialize, Serialize};

/// A bookmarked link record as stored in the `sites` document.
///
/// Field names follow the stored JSON shape, so documents written by earlier
/// deployments keep reading back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "isPublic", default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub clicks: u64,
    /// Name reference into the category collection, or empty for unfiled.
    #[serde(default)]
    pub category: String,
}

fn default_true() -> bool {
    true
}

impl Site {
    /// Decode one stored array element.
    ///
    /// # Returns
    /// The site, or `None` for null/unreadable entries (dropped the same way
    /// every mutating reader drops them).
    pub fn from_value(value: &serde_json::Value) -> Option<Site> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// A validated site draft ready for insertion.
#[derive(Debug, Clone)]
pub struct NewSite {
    /// Caller-supplied id; a fresh UUID is assigned when absent.
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    pub description: String,
    pub is_public: bool,
    pub category: String,
}

/// Validated partial update for an existing site.
///
/// `Some("")` is an explicit clear marker for `url`, `description`, and
/// `category`; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct SiteUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Request payload for adding a site.
#[derive(Debug, Deserialize)]
pub struct AddSiteRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "isPublic")]
    pub is_public: Option<bool>,
    pub category: Option<String>,
}

/// Request payload for updating a site.
#[derive(Debug, Deserialize)]
pub struct UpdateSiteRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Request payload for endpoints addressed by site id (delete, click).
#[derive(Debug, Deserialize)]
pub struct SiteIdRequest {
    pub id: Option<String>,
}
