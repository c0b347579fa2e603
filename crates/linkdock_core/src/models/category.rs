//! Category-related data models.

use serde::{Deserialize, Serialize};

/// A named grouping referenced by sites via [`super::Site::category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

impl Category {
    /// Decode one stored array element, normalizing the legacy bare-string
    /// shape (`"tools"`) to the object shape (`{"name":"tools","desc":""}`).
    ///
    /// # Returns
    /// The category, or `None` for entries that are neither strings nor
    /// objects.
    pub fn from_value(value: &serde_json::Value) -> Option<Category> {
        match value {
            serde_json::Value::String(name) => Some(Category {
                name: name.clone(),
                desc: String::new(),
            }),
            serde_json::Value::Object(map) => {
                let field = |key: &str| {
                    map.get(key)
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string()
                };
                Some(Category {
                    name: field("name"),
                    desc: field("desc"),
                })
            }
            _ => None,
        }
    }
}

/// Validated partial update for an existing category.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    /// New name for a rename; `None` keeps the current name.
    pub new_name: Option<String>,
    /// New description; `Some("")` clears it, `None` keeps it.
    pub desc: Option<String>,
    /// Whether a rename rewrites the `category` field of referencing sites.
    pub update_sites: bool,
}

/// Request payload for adding (or upserting) a category.
#[derive(Debug, Deserialize)]
pub struct AddCategoryRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
}

/// Request payload for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(rename = "newName")]
    pub new_name: Option<String>,
    pub desc: Option<String>,
    #[serde(rename = "updateSites")]
    pub update_sites: Option<bool>,
}

/// Request payload for deleting a category.
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryRequest {
    pub name: Option<String>,
}
