//! On-disk cache for directory list payloads.
//!
//! Cached payloads live in expiry boxes `{expires, payload}` with a 3-day
//! TTL. Every invalidation also rewrites a bust marker so other `ldock`
//! invocations can tell the cache turned over. All cache I/O is best-effort:
//! a broken or stale box reads as a miss and gets removed.

use chrono::Utc;
use linkdock_core::config::resolve_home_dir;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SITES_KEY: &str = "sites";
pub const CATEGORIES_KEY: &str = "categories";
const BUST_MARKER: &str = "bust";
const ALL_KEYS: [&str; 2] = [SITES_KEY, CATEGORIES_KEY];

#[derive(Debug, Serialize, Deserialize)]
struct CacheBox<T> {
    expires: i64,
    payload: T,
}

/// Cache directory under the user's cache root.
pub fn default_cache_dir() -> PathBuf {
    resolve_home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join("linkdock")
}

fn box_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", key))
}

/// Read a cached payload, treating expired or unreadable boxes as misses.
pub fn read_cache<T: DeserializeOwned>(dir: &Path, key: &str) -> Option<T> {
    let path = box_path(dir, key);
    let raw = std::fs::read_to_string(&path).ok()?;
    let parsed: CacheBox<T> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(_) => {
            let _ = std::fs::remove_file(&path);
            return None;
        }
    };
    if parsed.expires <= Utc::now().timestamp_millis() {
        let _ = std::fs::remove_file(&path);
        return None;
    }
    Some(parsed.payload)
}

/// Store a payload in an expiry box.
pub fn write_cache<T: Serialize>(dir: &Path, key: &str, payload: &T, ttl_ms: i64) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let boxed = CacheBox {
        expires: Utc::now().timestamp_millis() + ttl_ms.max(0),
        payload,
    };
    if let Ok(doc) = serde_json::to_string(&boxed) {
        let _ = std::fs::write(box_path(dir, key), doc);
    }
}

/// Drop cached payloads and stamp the bust marker.
///
/// # Arguments
/// - `keys`: Specific keys to drop, or `None` for every known key.
pub fn invalidate(dir: &Path, keys: Option<&[&str]>) {
    let targets = keys.unwrap_or(&ALL_KEYS);
    for key in targets {
        let _ = std::fs::remove_file(box_path(dir, key));
    }
    if std::fs::create_dir_all(dir).is_ok() {
        let _ = std::fs::write(
            dir.join(BUST_MARKER),
            Utc::now().timestamp_millis().to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkdock_core::constants::DEFAULT_CACHE_TTL_MS;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_returns_payload() {
        let dir = TempDir::new().unwrap();
        let payload = json!([{ "name": "tools", "desc": "" }]);
        write_cache(dir.path(), CATEGORIES_KEY, &payload, DEFAULT_CACHE_TTL_MS);

        let cached: serde_json::Value = read_cache(dir.path(), CATEGORIES_KEY).unwrap();
        assert_eq!(cached, payload);
    }

    #[test]
    fn expired_boxes_read_as_misses_and_are_removed() {
        let dir = TempDir::new().unwrap();
        write_cache(dir.path(), SITES_KEY, &json!([]), 0);

        let cached: Option<serde_json::Value> = read_cache(dir.path(), SITES_KEY);
        assert!(cached.is_none());
        assert!(!dir.path().join("sites.json").exists());
    }

    #[test]
    fn corrupt_boxes_read_as_misses_and_are_removed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sites.json"), "not a box").unwrap();

        let cached: Option<serde_json::Value> = read_cache(dir.path(), SITES_KEY);
        assert!(cached.is_none());
        assert!(!dir.path().join("sites.json").exists());
    }

    #[test]
    fn invalidate_drops_boxes_and_stamps_bust_marker() {
        let dir = TempDir::new().unwrap();
        write_cache(dir.path(), SITES_KEY, &json!([]), DEFAULT_CACHE_TTL_MS);
        write_cache(dir.path(), CATEGORIES_KEY, &json!([]), DEFAULT_CACHE_TTL_MS);

        invalidate(dir.path(), None);

        assert!(!dir.path().join("sites.json").exists());
        assert!(!dir.path().join("categories.json").exists());
        let marker = std::fs::read_to_string(dir.path().join("bust")).unwrap();
        assert!(marker.parse::<i64>().is_ok());
    }

    #[test]
    fn invalidate_can_target_a_single_key() {
        let dir = TempDir::new().unwrap();
        write_cache(dir.path(), SITES_KEY, &json!([]), DEFAULT_CACHE_TTL_MS);
        write_cache(dir.path(), CATEGORIES_KEY, &json!([]), DEFAULT_CACHE_TTL_MS);

        invalidate(dir.path(), Some(&[SITES_KEY]));

        assert!(!dir.path().join("sites.json").exists());
        assert!(dir.path().join("categories.json").exists());
    }
}
