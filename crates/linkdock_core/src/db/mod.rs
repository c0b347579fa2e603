//! Document store for the site and category collections.
//!
//! Both collections live as whole JSON documents under fixed keys in one sled
//! database. Every mutating operation runs a full read-modify-write cycle
//! under [`Database::write_lock`], so two concurrent mutations cannot read the
//! same snapshot and silently drop one another's update. Reads are lock-free.

/// Category document accessors.
pub mod category;
/// Site document accessors.
pub mod site;

use crate::error::AppError;
use crate::models::category::{Category, CategoryUpdate};
use crate::models::site::{NewSite, Site, SiteUpdate};
use sled::Db;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Database handle with access to the two collection documents.
pub struct Database {
    pub db: Arc<Db>,
    pub sites: site::SiteDb,
    pub categories: category::CategoryDb,
    write_lock: Mutex<()>,
}

impl Database {
    /// Open the database, creating the data directory as needed.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if sled cannot open the database.
    pub fn new(path: &str) -> Result<Self, AppError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let db = match sled::open(path) {
            Ok(db) => Arc::new(db),
            Err(e) if e.to_string().contains("could not acquire lock") => {
                return Err(AppError::StorageMessage(format!(
                    "Database at '{}' is locked by another process.\n\
                     Stop the other linkdock instance first, or set DB_PATH to a different location.",
                    path
                )));
            }
            Err(e) => return Err(AppError::StorageMessage(e.to_string())),
        };

        Ok(Self::from_shared(db))
    }

    /// Build a database handle from an existing shared sled instance.
    ///
    /// # Returns
    /// A new [`Database`] wrapper that shares the underlying sled instance.
    pub fn from_shared(db: Arc<Db>) -> Self {
        Self {
            sites: site::SiteDb::new(db.clone()),
            categories: category::CategoryDb::new(db.clone()),
            db,
            write_lock: Mutex::new(()),
        }
    }

    /// Flush all pending writes to disk.
    ///
    /// # Errors
    /// Returns an error if sled fails to flush.
    pub fn flush(&self) -> Result<(), AppError> {
        self.db.flush()?;
        Ok(())
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        // The lock only serializes mutations and guards no data, so a
        // panic while holding it leaves nothing inconsistent to protect.
        self.write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// List all sites, normalized.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    pub fn list_sites(&self) -> Result<Vec<Site>, AppError> {
        self.sites.load()
    }

    /// List all categories, normalized.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    pub fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.categories.load()
    }

    /// Insert a new site.
    ///
    /// # Arguments
    /// - `draft`: Validated site draft; a fresh UUID is assigned when it
    ///   carries no id.
    ///
    /// # Returns
    /// The id of the inserted site.
    ///
    /// # Errors
    /// [`AppError::UnknownCategory`] when the draft references a category
    /// that does not exist, [`AppError::Conflict`] when the id or url is
    /// already taken.
    pub fn add_site(&self, draft: NewSite) -> Result<String, AppError> {
        let _guard = self.write_guard();

        if !draft.category.is_empty() {
            let categories = self.categories.load()?;
            if !category_names(&categories).any(|name| name == draft.category) {
                return Err(AppError::UnknownCategory(draft.category));
            }
        }

        let mut sites = self.sites.load()?;
        let id = draft.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        if sites.iter().any(|s| s.id == id || s.url == draft.url) {
            return Err(AppError::Conflict(format!(
                "site id '{}' or url '{}' already exists",
                id, draft.url
            )));
        }

        sites.push(Site {
            id: id.clone(),
            title: draft.title,
            url: draft.url,
            description: draft.description,
            is_public: draft.is_public,
            clicks: 0,
            category: draft.category,
        });
        self.sites.save(&sites)?;
        Ok(id)
    }

    /// Apply a partial update to a site.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the id matches no site,
    /// [`AppError::UnknownCategory`] when assigning a non-empty category that
    /// does not exist, [`AppError::Conflict`] when changing the url to one
    /// another site already uses.
    pub fn update_site(&self, id: &str, update: SiteUpdate) -> Result<(), AppError> {
        let _guard = self.write_guard();

        let mut sites = self.sites.load()?;
        let idx = sites
            .iter()
            .position(|s| s.id == id)
            .ok_or(AppError::NotFound)?;

        // Empty category is an explicit clear and skips existence validation.
        if let Some(ref category) = update.category {
            if !category.is_empty() {
                let categories = self.categories.load()?;
                if !category_names(&categories).any(|name| name == *category) {
                    return Err(AppError::UnknownCategory(category.clone()));
                }
            }
        }

        if let Some(ref url) = update.url {
            if !url.is_empty() && *url != sites[idx].url {
                let taken = sites
                    .iter()
                    .enumerate()
                    .any(|(i, s)| i != idx && s.url == *url);
                if taken {
                    return Err(AppError::Conflict(format!(
                        "another site already uses url '{}'",
                        url
                    )));
                }
            }
        }

        let site = &mut sites[idx];
        if let Some(title) = update.title {
            site.title = title;
        }
        if let Some(url) = update.url {
            site.url = url;
        }
        if let Some(description) = update.description {
            site.description = description;
        }
        if let Some(category) = update.category {
            site.category = category;
        }

        self.sites.save(&sites)
    }

    /// Delete a site by id.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the id matches no site.
    pub fn delete_site(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_guard();

        let mut sites = self.sites.load()?;
        let before = sites.len();
        sites.retain(|s| s.id != id);
        if sites.len() == before {
            return Err(AppError::NotFound);
        }
        self.sites.save(&sites)
    }

    /// Increment a site's click counter by exactly one.
    ///
    /// # Returns
    /// The post-increment count.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the id matches no site.
    pub fn click_site(&self, id: &str) -> Result<u64, AppError> {
        let _guard = self.write_guard();

        let mut sites = self.sites.load()?;
        let site = sites
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound)?;
        site.clicks = site.clicks.saturating_add(1);
        let clicks = site.clicks;
        self.sites.save(&sites)?;
        Ok(clicks)
    }

    /// Insert a category, or refresh the description of an existing one.
    ///
    /// An existing name keeps its record; a non-empty `desc` replaces the
    /// stored description.
    ///
    /// # Errors
    /// Propagates storage errors.
    pub fn add_category(&self, name: String, desc: String) -> Result<(), AppError> {
        let _guard = self.write_guard();

        let mut categories = self.categories.load()?;
        if let Some(existing) = categories.iter_mut().find(|c| c.name == name) {
            if !desc.is_empty() {
                existing.desc = desc;
            }
        } else {
            categories.push(Category { name, desc });
        }
        self.categories.save(&categories)
    }

    /// Rename a category and/or update its description.
    ///
    /// Renames rewrite referencing sites when `update.update_sites` is set.
    /// The site document is written before the category document, matching
    /// the order referencing readers expect during a crash window.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the name matches no category,
    /// [`AppError::Conflict`] when the new name is already taken.
    pub fn update_category(&self, name: &str, update: CategoryUpdate) -> Result<(), AppError> {
        let _guard = self.write_guard();

        let mut categories = self.categories.load()?;
        let idx = categories
            .iter()
            .position(|c| c.name == name)
            .ok_or(AppError::NotFound)?;

        let rename = update
            .new_name
            .filter(|n| !n.is_empty() && n.as_str() != name);
        if let Some(new_name) = rename {
            if categories.iter().any(|c| c.name == new_name) {
                return Err(AppError::Conflict(format!(
                    "category '{}' already exists",
                    new_name
                )));
            }
            categories[idx].name = new_name.clone();

            if update.update_sites {
                let mut sites = self.sites.load()?;
                let mut changed = 0usize;
                for site in &mut sites {
                    if site.category == name {
                        site.category = new_name.clone();
                        changed += 1;
                    }
                }
                if changed > 0 {
                    tracing::debug!(
                        "category rename '{}' -> '{}' rewrote {} site(s)",
                        name,
                        new_name,
                        changed
                    );
                    self.sites.save(&sites)?;
                }
            }
        }

        if let Some(desc) = update.desc {
            categories[idx].desc = desc;
        }

        self.categories.save(&categories)
    }

    /// Delete a category and clear it from every referencing site.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the name matches no category.
    pub fn delete_category(&self, name: &str) -> Result<(), AppError> {
        let _guard = self.write_guard();

        let mut categories = self.categories.load()?;
        let before = categories.len();
        categories.retain(|c| c.name != name);
        if categories.len() == before {
            return Err(AppError::NotFound);
        }
        self.categories.save(&categories)?;

        let mut sites = self.sites.load()?;
        let mut changed = false;
        for site in &mut sites {
            if site.category == name {
                site.category.clear();
                changed = true;
            }
        }
        if changed {
            self.sites.save(&sites)?;
        }

        Ok(())
    }
}

/// Names usable as site references; unnamed records never validate.
fn category_names(categories: &[Category]) -> impl Iterator<Item = &str> {
    categories
        .iter()
        .map(|c| c.name.as_str())
        .filter(|name| !name.is_empty())
}
