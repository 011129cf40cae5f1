use axum::{Router, extract::DefaultBodyLimit, routing::post};
use livefit_core::file_storage::MAX_IMAGE_BYTES;

use crate::state::AppState;

use super::controller::upload_image;

/// Multipart framing on top of the largest accepted image.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn init_uploads_router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_image))
        // the handler stops reading at MAX_IMAGE_BYTES; this caps everything else
        .layer(DefaultBodyLimit::max(4 * MAX_IMAGE_BYTES + MULTIPART_OVERHEAD))
}
