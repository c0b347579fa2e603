//! Site document storage over the sled store.

use crate::constants::SITES_KEY;
use crate::error::AppError;
use crate::models::site::Site;
use sled::Db;
use std::sync::Arc;

/// Accessor for the `sites` document.
pub struct SiteDb {
    db: Arc<Db>,
}

impl SiteDb {
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
            .get(SITES_KEY)?
            .map(|v| String::from_utf8_lossy(&v).into_owned())
            .unwrap_or_else(|| "[]".to_string()))
    }

    /// Load and normalize the site collection.
    ///
    /// Unparseable documents and unreadable entries read as empty, matching
    /// the forgiving reader used by every endpoint.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    pub fn load(&self) -> Result<Vec<Site>, AppError> {
        Ok(parse_collection(&self.load_raw()?))
    }

    /// Write the full collection back as one JSON document.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, sites: &[Site]) -> Result<(), AppError> {
        let doc = serde_json::to_string(sites)?;
        self.db.insert(SITES_KEY, doc.as_bytes())?;
        Ok(())
    }
}

fn parse_collection(raw: &str) -> Vec<Site> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };
    match value {
        serde_json::Value::Array(items) => items.iter().filter_map(Site::from_value).collect(),
        _ => Vec::new(),
    }
}
