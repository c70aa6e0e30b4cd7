//! Handlers for `/admin/projects/{id}/images`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pondasi_core::error::CoreError;
use pondasi_core::ordering::normalize_order;
use pondasi_core::types::DbId;
use pondasi_db::models::project::{CreateProjectImage, ProjectImage};
use pondasi_db::models::ReorderRequest;
use pondasi_db::repositories::{ProjectImageRepo, ProjectRepo};
use validator::Validate;

use super::projects::not_found as project_not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_project(state: &AppState, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;
    Ok(())
}

/// GET /api/v1/admin/projects/{id}/images
pub async fn list(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectImage>>>> {
    ensure_project(&state, project_id).await?;
    let images = ProjectImageRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/admin/projects/{id}/images
///
/// `image_path` is normally a path returned by the upload endpoint.
pub async fn add(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectImage>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectImage>>)> {
    input.validate()?;
    ensure_project(&state, project_id).await?;
    let image = ProjectImageRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        project_id,
        image_id = image.id,
        sort_order = image.sort_order,
        "Project image added"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// DELETE /api/v1/admin/projects/{id}/images/{image_id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !ProjectImageRepo::delete(&state.pool, project_id, image_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectImage",
            id: image_id,
        }));
    }
    tracing::info!(user_id = user.user_id, project_id, image_id, "Project image deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/projects/{id}/images/reorder
///
/// Body lists every image id of the project in its new order.
pub async fn reorder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<ProjectImage>>>> {
    ensure_project(&state, project_id).await?;
    let existing = ProjectImageRepo::ids_for_project(&state.pool, project_id).await?;
    let order = normalize_order(&existing, &input.ids)?;
    ProjectImageRepo::reorder(&state.pool, &order).await?;
    tracing::info!(user_id = user.user_id, project_id, count = order.len(), "Project images reordered");

    let images = ProjectImageRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: images }))
}
