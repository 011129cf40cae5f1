use chrono::Utc;
use livefit_core::file_storage::{READ_URL_TTL, UploadPolicy, build_image_key};
use livefit_core::{AppError, FileStorage, StorageError};
use tracing::{error, info, instrument, warn};

/// An image read from the request, not yet checked.
#[derive(Debug)]
pub struct IncomingImage {
    pub file_name: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

fn storage_error(err: StorageError) -> AppError {
    if err.is_client_error() {
        warn!(error = %err, "upload rejected");
        return AppError::bad_request(err);
    }
    error!(error = %err, "storage backend failed");
    AppError::internal(err)
}

pub struct UploadService;

impl UploadService {
    /// Checks the image, stores it and returns a URL readable for a day.
    #[instrument(skip(storage, image), fields(file.name = %image.file_name, file.size = image.body.len()))]
    pub async fn store_image(
        storage: &dyn FileStorage,
        image: IncomingImage,
    ) -> Result<String, AppError> {
        UploadPolicy::images()
            .check(image.body.len(), &image.content_type)
            .map_err(storage_error)?;

        let key = build_image_key(&image.file_name, Utc::now().timestamp_millis());
        let key = storage
            .save(&key, &image.body, &image.content_type)
            .await
            .map_err(storage_error)?;

        let url = storage
            .read_url(&key, READ_URL_TTL)
            .await
            .map_err(storage_error)?;

        info!(file.key = %key, "image stored");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livefit_core::LocalFileStorage;
    use livefit_core::file_storage::MAX_IMAGE_BYTES;

    fn storage() -> LocalFileStorage {
        let dir = std::env::temp_dir().join(format!("livefit-upload-{}", uuid::Uuid::new_v4()));
        LocalFileStorage::new(dir, "http://localhost:3000/uploads".to_string())
    }

    fn image(content_type: &str, size: usize) -> IncomingImage {
        IncomingImage {
            file_name: "avatar.png".to_string(),
            content_type: content_type.to_string(),
            body: vec![0u8; size],
        }
    }

    #[tokio::test]
    async fn test_store_png_returns_public_url() {
        let storage = storage();
        let url = UploadService::store_image(&storage, image("image/png", 128))
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:3000/uploads/images/"));
        assert!(url.ends_with("-avatar.png"));
        let _ = std::fs::remove_dir_all(storage.base_dir());
    }

    #[tokio::test]
    async fn test_oversized_image_is_bad_request() {
        let err = UploadService::store_image(&storage(), image("image/png", MAX_IMAGE_BYTES + 1))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.error.to_string(), "File exceeds the 2MB limit");
    }

    #[tokio::test]
    async fn test_gif_is_rejected() {
        let err = UploadService::store_image(&storage(), image("image/gif", 16))
            .await
            .unwrap_err();
        assert_eq!(err.error.to_string(), "Unsupported file type");
    }
}
