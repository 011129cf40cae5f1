//! File storage abstraction for uploaded images.
//!
//! Handlers talk to a [`FileStorage`] trait object, so the local disk backend
//! used in development and tests and the S3-compatible backend used in
//! production are interchangeable.
//!
//! # Example
//!
//! ```ignore
//! use livefit_core::file_storage::{FileStorage, LocalFileStorage, UploadPolicy};
//!
//! let storage = LocalFileStorage::new("./storage/uploads".into(), "http://localhost:3000/uploads".into());
//! UploadPolicy::images().check(bytes.len(), "image/png")?;
//! let key = build_image_key("avatar.png", Utc::now().timestamp_millis());
//! storage.save(&key, &bytes, "image/png").await?;
//! let url = storage.read_url(&key, READ_URL_TTL).await?;
//! ```

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;
use tokio::fs;

/// How long a generated read URL stays valid.
pub const READ_URL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

pub trait FileStorage: Send + Sync {
    /// Stores `content` under `key` and returns the key.
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
        content_type: &'a str,
    ) -> StorageFuture<'a, String>;

    /// URL a client can fetch the object from for at least `ttl`.
    fn read_url<'a>(&'a self, key: &'a str, ttl: Duration) -> StorageFuture<'a, String>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File exceeds the 2MB limit")]
    TooLarge { max_bytes: usize },

    #[error("Unsupported file type")]
    UnsupportedType { received: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Errors caused by the uploaded file rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::TooLarge { .. } | Self::UnsupportedType { .. })
    }
}

/// Size and MIME type rules applied before anything is stored.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
}

impl UploadPolicy {
    pub fn images() -> Self {
        Self {
            max_bytes: MAX_IMAGE_BYTES,
            allowed_types: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn check(&self, size: usize, content_type: &str) -> Result<(), StorageError> {
        if size > self.max_bytes {
            return Err(StorageError::TooLarge {
                max_bytes: self.max_bytes,
            });
        }

        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !self.allowed_types.iter().any(|t| *t == mime) {
            return Err(StorageError::UnsupportedType {
                received: content_type.to_string(),
            });
        }

        Ok(())
    }
}

/// `images/<timestamp>-<filename>` with the filename reduced to safe characters.
pub fn build_image_key(original_name: &str, timestamp_millis: i64) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    let name = if cleaned.is_empty() { "upload" } else { cleaned };
    format!("images/{}-{}", timestamp_millis, name)
}

pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
        return Err(StorageError::InvalidKey(
            "Key must not be empty, contain '..', or start with a separator".to_string(),
        ));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.'))
    {
        return Err(StorageError::InvalidKey(
            "Key contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Stores files under a directory served at `base_url`.
///
/// Local URLs are public, so the TTL passed to `read_url` is not enforced.
#[derive(Clone)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self { base_dir, base_url }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
        _content_type: &'a str,
    ) -> StorageFuture<'a, String> {
        Box::pin(async move {
            validate_key(key)?;

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&file_path, content).await?;

            Ok(key.to_string())
        })
    }

    fn read_url<'a>(&'a self, key: &'a str, _ttl: Duration) -> StorageFuture<'a, String> {
        Box::pin(async move {
            validate_key(key)?;
            Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
        })
    }
}
