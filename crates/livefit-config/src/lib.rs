//! # LiveFit Config
//!
//! Configuration types for the LiveFit API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`rate_limit`]: Rate limiting for the signup and login endpoints
//! - [`storage`]: Image storage backend selection
//!
//! # Example
//!
//! ```ignore
//! use livefit_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, StorageConfig};
//!
//! let database = DatabaseConfig::from_env()?;
//! let jwt_config = JwtConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! let storage_config = StorageConfig::from_env()?;
//! ```

use thiserror::Error;

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod storage;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use storage::{StorageConfig, StorageDriver};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

pub(crate) fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

pub(crate) fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
