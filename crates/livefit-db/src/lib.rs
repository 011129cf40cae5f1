//! # LiveFit DB
//!
//! Database pool and utilities for the LiveFit API.
//!
//! # Example
//!
//! ```ignore
//! use livefit_db::init_db_pool;
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! sqlx::migrate!("./migrations").run(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Opens a PostgreSQL pool with at most `max_connections` connections.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "database pool ready");
    Ok(pool)
}

/// Maps a unique-constraint violation to `Some(constraint name)`.
///
/// Callers use this after an insert that raced past an existence check.
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = err
        && db_err.is_unique_violation()
    {
        return Some(db_err.constraint().unwrap_or_default().to_string());
    }
    None
}

/// True when a delete or update was refused because other rows still reference the target.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
