//! Core domain library for linkdock (config, storage, models).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across linkdock crates.
pub mod constants;
/// Document store over the sled key-value database.
pub mod db;
/// Application error types (storage/domain).
pub mod error;
/// Data models for API requests and persistence.
pub mod models;

pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use db::Database;
pub use error::AppError;
