//! Category document storage over the sled store.

use crate::constants::CATEGORIES_KEY;
use crate::error::AppError;
use crate::models::category::Category;
use sled::Db;
use std::sync::Arc;

/// Accessor for the `categories` document.
pub struct CategoryDb {
    db: Arc<Db>,
}

impl CategoryDb {
    pub(crate) fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    /// Read the raw stored document, defaulting to an empty array.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    pub fn load_raw(&self) -> Result<String, AppError> {
        Ok(self
            .db
            .get(CATEGORIES_KEY)?
            .map(|v| String::from_utf8_lossy(&v).into_owned())
            .unwrap_or_else(|| "[]".to_string()))
    }

    /// Load and normalize the category collection.
    ///
    /// Legacy documents storing bare strings come back as `{name, desc: ""}`
    /// records; unparseable documents read as empty.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    pub fn load(&self) -> Result<Vec<Category>, AppError> {
        Ok(parse_collection(&self.load_raw()?))
    }

    /// Write the full collection back as one JSON document.
    ///
    /// Always stores the object shape, migrating legacy documents on the
    /// first write that touches them.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, categories: &[Category]) -> Result<(), AppError> {
        let doc = serde_json::to_string(categories)?;
        self.db.insert(CATEGORIES_KEY, doc.as_bytes())?;
        Ok(())
    }
}

fn parse_collection(raw: &str) -> Vec<Category> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };
    match value {
        serde_json::Value::Array(items) => items.iter().filter_map(Category::from_value).collect(),
        _ => Vec::new(),
    }
}
