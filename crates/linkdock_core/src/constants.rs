//! Shared constants used across linkdock crates.

/// Default API port for linkdock.
pub const DEFAULT_PORT: u16 = 38412;

/// Default maximum request body size accepted by the API layer.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Store key holding the site collection document.
pub const SITES_KEY: &str = "sites";

/// Store key holding the category collection document.
pub const CATEGORIES_KEY: &str = "categories";

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://localhost:38412";

/// Time-to-live for CLI list caches, in milliseconds (3 days).
pub const DEFAULT_CACHE_TTL_MS: i64 = 1000 * 60 * 60 * 24 * 3;
