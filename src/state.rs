use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use livefit_config::{
    CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, StorageConfig, StorageDriver,
};
use livefit_core::FileStorage;
use livefit_db::init_db_pool;
use sqlx::PgPool;

use crate::storage::build_storage;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub storage: Arc<dyn FileStorage>,
    /// Served at `/uploads` when images are kept on local disk.
    pub upload_dir: Option<PathBuf>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("rate_limit_config", &self.rate_limit_config)
            .field("upload_dir", &self.upload_dir)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database = DatabaseConfig::from_env()?;
    let storage_config = StorageConfig::from_env()?;

    Ok(AppState {
        db: init_db_pool(&database.url, database.max_connections).await?,
        jwt_config: JwtConfig::from_env()?,
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        storage: build_storage(&storage_config).await?,
        upload_dir: (storage_config.driver == StorageDriver::Local)
            .then(|| PathBuf::from(&storage_config.local_dir)),
    })
}
