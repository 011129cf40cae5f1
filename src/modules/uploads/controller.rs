use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use livefit_core::file_storage::MAX_IMAGE_BYTES;
use livefit_core::{ApiResponse, AppError, StorageError};
use livefit_models::UploadResponse;
use tracing::{debug, instrument};

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::service::{IncomingImage, UploadService};

pub const NO_FILE: &str = "Please select a file to upload";

const FILE_FIELDS: [&str; 2] = ["file", "files"];

fn too_large() -> AppError {
    AppError::bad_request(StorageError::TooLarge {
        max_bytes: MAX_IMAGE_BYTES,
    })
}

/// A body cut off by the size limit is an oversized file, anything else a missing one.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        debug!(error = %err, "upload body over the limit");
        return too_large();
    }
    debug!(error = %err, "malformed multipart body");
    AppError::failed(NO_FILE)
}

/// Reads the first `file`/`files` part of the form, stopping as soon as it
/// grows past `MAX_IMAGE_BYTES`.
async fn read_image(multipart: &mut Multipart) -> Result<Option<IncomingImage>, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if !field.name().is_some_and(|name| FILE_FIELDS.contains(&name)) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let mut body = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if body.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        if body.is_empty() {
            return Ok(None);
        }

        return Ok(Some(IncomingImage {
            file_name,
            content_type,
            body,
        }));
    }

    Ok(None)
}

/// Upload a JPEG or PNG image
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content_type = "multipart/form-data", description = "Form with a `file` part"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing file, too large or unsupported type", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
#[instrument(skip(state, auth_user, multipart), fields(user.id = %auth_user.id()))]
pub async fn upload_image(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<ApiResponse<UploadResponse>, AppError> {
    let image = read_image(&mut multipart)
        .await?
        .ok_or_else(|| AppError::failed(NO_FILE))?;

    let image_url = UploadService::store_image(state.storage.as_ref(), image).await?;
    Ok(ApiResponse::success(UploadResponse { image_url }))
}
