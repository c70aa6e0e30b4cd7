//! Handlers for the `/admin/gallery` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pondasi_core::error::CoreError;
use pondasi_core::ordering::normalize_order;
use pondasi_core::types::DbId;
use pondasi_db::models::gallery::{CreateGalleryPhoto, GalleryPhoto, UpdateGalleryPhoto};
use pondasi_db::models::ReorderRequest;
use pondasi_db::repositories::GalleryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GalleryPhoto",
        id,
    })
}

/// GET /api/v1/admin/gallery
pub async fn list(
    _editor: RequireEditor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<GalleryPhoto>>>> {
    let photos = GalleryRepo::list(&state.pool, None).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// GET /api/v1/admin/gallery/{id}
pub async fn get_by_id(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GalleryPhoto>>> {
    let photo = GalleryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: photo }))
}

/// POST /api/v1/admin/gallery
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryPhoto>,
) -> AppResult<(StatusCode, Json<DataResponse<GalleryPhoto>>)> {
    input.validate()?;
    let photo = GalleryRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.user_id, photo_id = photo.id, "Gallery photo added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// PUT /api/v1/admin/gallery/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryPhoto>,
) -> AppResult<Json<DataResponse<GalleryPhoto>>> {
    input.validate()?;
    let photo = GalleryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = user.user_id, photo_id = id, "Gallery photo updated");
    Ok(Json(DataResponse { data: photo }))
}

/// DELETE /api/v1/admin/gallery/{id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GalleryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, photo_id = id, "Gallery photo deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/gallery/reorder
pub async fn reorder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<GalleryPhoto>>>> {
    let existing = GalleryRepo::ids(&state.pool).await?;
    let order = normalize_order(&existing, &input.ids)?;
    GalleryRepo::reorder(&state.pool, &order).await?;
    tracing::info!(user_id = user.user_id, count = order.len(), "Gallery reordered");
    let photos = GalleryRepo::list(&state.pool, None).await?;
    Ok(Json(DataResponse { data: photos }))
}
