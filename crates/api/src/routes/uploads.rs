//! Route definitions for image uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::config::UploadConfig;
use crate::handlers::uploads::{self, MAX_BATCH_FILES};
use crate::state::AppState;

/// Multipart framing overhead allowed on top of the file payloads.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes mounted at `/admin/uploads`.
///
/// ```text
/// POST /image    -> upload_image   (multipart: file, folder?)
/// POST /images   -> upload_images  (multipart: files..., folder?)
/// ```
pub fn router(config: &UploadConfig) -> Router<AppState> {
    let single_limit = config.max_bytes + MULTIPART_OVERHEAD;
    let batch_limit = config.max_bytes.saturating_mul(MAX_BATCH_FILES) + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/image",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(single_limit)),
        )
        .route(
            "/images",
            post(uploads::upload_images).layer(DefaultBodyLimit::max(batch_limit)),
        )
}
