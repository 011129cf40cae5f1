//! S3-compatible object storage backend and backend selection.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use aws_config::{BehaviorVersion, defaults};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    Client,
    config::{Builder as S3ConfigBuilder, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use livefit_config::{StorageConfig, StorageDriver};
use livefit_core::file_storage::{
    FileStorage, LocalFileStorage, StorageError, StorageFuture, validate_key,
};
use tracing::info;

#[derive(Clone)]
pub struct S3FileStorage {
    client: Client,
    bucket: String,
}

impl S3FileStorage {
    pub async fn new(config: &StorageConfig) -> anyhow::Result<Self> {
        let bucket = config
            .bucket
            .clone()
            .context("STORAGE_BUCKET must be set for the s3 driver")?;

        let mut loader =
            defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            loader = loader.credentials_provider(Credentials::new(
                access_key, secret_key, None, None, "static",
            ));
        }
        let shared = loader.load().await;

        let mut builder = S3ConfigBuilder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket,
        })
    }
}

fn backend(context: &str, err: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(format!("{context}: {err}"))
}

impl FileStorage for S3FileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
        content_type: &'a str,
    ) -> StorageFuture<'a, String> {
        Box::pin(async move {
            validate_key(key)?;
            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(key)
                .body(ByteStream::from(content.to_vec()))
                .content_type(content_type)
                .send()
                .await
                .map_err(|e| backend("s3 put_object", e))?;
            Ok(key.to_string())
        })
    }

    fn read_url<'a>(&'a self, key: &'a str, ttl: Duration) -> StorageFuture<'a, String> {
        Box::pin(async move {
            validate_key(key)?;
            let presigning = PresigningConfig::expires_in(ttl).map_err(|e| backend("presign config", e))?;
            let presigned = self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(key)
                .presigned(presigning)
                .await
                .map_err(|e| backend("s3 presign get_object", e))?;
            Ok(presigned.uri().to_string())
        })
    }
}

/// Builds the backend named by `STORAGE_DRIVER`.
pub async fn build_storage(config: &StorageConfig) -> anyhow::Result<Arc<dyn FileStorage>> {
    match config.driver {
        StorageDriver::Local => {
            info!(dir = %config.local_dir, "using local image storage");
            Ok(Arc::new(LocalFileStorage::new(
                config.local_dir.clone().into(),
                config.public_url.clone(),
            )))
        }
        StorageDriver::S3 => {
            let storage = S3FileStorage::new(config).await?;
            info!(bucket = %storage.bucket, "using s3 image storage");
            Ok(Arc::new(storage))
        }
    }
}
