//! Image upload handlers.
//!
//! Every uploaded image is decoded, downscaled if needed and re-encoded as
//! WebP before it touches the disk. A batch either stores every file or
//! none of them.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use pondasi_core::imaging::{convert_to_webp, ConversionOptions, ConvertedImage};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{validate_folder, StoredFile, DEFAULT_FOLDER};

/// Maximum number of files accepted by the multi-image endpoint.
pub const MAX_BATCH_FILES: usize = 20;

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    /// Public path, e.g. `/uploads/gallery/<uuid>.webp`.
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub original_format: &'static str,
    pub original_size: usize,
    pub converted_size: usize,
}

/// A file field read from the multipart body.
struct IncomingFile {
    name: String,
    data: Vec<u8>,
}

/// Multipart body: file fields named `file_field` plus an optional `folder`.
struct UploadForm {
    folder: String,
    files: Vec<IncomingFile>,
}

async fn read_form(mut multipart: Multipart, file_field: &str) -> AppResult<UploadForm> {
    let mut folder = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name == "folder" {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            folder = Some(value.trim().to_string()).filter(|f| !f.is_empty());
        } else if field_name == file_field || field_name == format!("{file_field}[]") {
            let name = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            files.push(IncomingFile {
                name,
                data: data.to_vec(),
            });
        }
    }

    let folder = folder.unwrap_or_else(|| DEFAULT_FOLDER.to_string());
    validate_folder(&folder)?;
    Ok(UploadForm { folder, files })
}

/// Convert every file on the blocking pool. The first failure aborts.
async fn convert_all(
    files: Vec<IncomingFile>,
    options: ConversionOptions,
) -> AppResult<Vec<ConvertedImage>> {
    let converted = tokio::task::spawn_blocking(move || {
        files
            .iter()
            .map(|f| convert_to_webp(&f.name, &f.data, &options))
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Image conversion task failed: {e}")))??;
    Ok(converted)
}

/// Write all converted images, removing the ones already written if any
/// write fails.
async fn store_all(
    state: &AppState,
    folder: &str,
    images: Vec<ConvertedImage>,
) -> AppResult<Vec<UploadedImage>> {
    let mut stored: Vec<StoredFile> = Vec::with_capacity(images.len());
    let mut uploaded = Vec::with_capacity(images.len());

    for image in images {
        let file = match state.storage.save(folder, &image.bytes).await {
            Ok(file) => file,
            Err(e) => {
                state.storage.remove_all(&stored).await;
                return Err(e.into());
            }
        };
        uploaded.push(UploadedImage {
            path: file.public_path.clone(),
            width: image.width,
            height: image.height,
            original_format: image.original_format,
            original_size: image.original_size,
            converted_size: image.converted_size(),
        });
        stored.push(file);
    }

    Ok(uploaded)
}

/// POST /api/v1/admin/uploads/image
///
/// Multipart fields: `file` (required), `folder` (optional, default `images`).
pub async fn upload_image(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedImage>>)> {
    let form = read_form(multipart, "file").await?;
    if form.files.len() != 1 {
        return Err(AppError::BadRequest(
            "Expected exactly one `file` field".to_string(),
        ));
    }

    let converted = convert_all(form.files, state.config.upload.conversion_options()).await?;
    let mut uploaded = store_all(&state, &form.folder, converted).await?;
    let image = uploaded
        .pop()
        .ok_or_else(|| AppError::InternalError("Upload produced no file".to_string()))?;

    tracing::info!(
        user_id = user.user_id,
        path = %image.path,
        original_size = image.original_size,
        converted_size = image.converted_size,
        "Image uploaded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// POST /api/v1/admin/uploads/images
///
/// Multipart fields: repeated `files` (or `files[]`), `folder` (optional).
pub async fn upload_images(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<UploadedImage>>>)> {
    let form = read_form(multipart, "files").await?;
    if form.files.is_empty() {
        return Err(AppError::BadRequest(
            "No files received in multipart upload".to_string(),
        ));
    }
    if form.files.len() > MAX_BATCH_FILES {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_BATCH_FILES} files can be uploaded at once"
        )));
    }

    let converted = convert_all(form.files, state.config.upload.conversion_options()).await?;
    let uploaded = store_all(&state, &form.folder, converted).await?;

    tracing::info!(
        user_id = user.user_id,
        folder = %form.folder,
        count = uploaded.len(),
        "Images uploaded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: uploaded })))
}
