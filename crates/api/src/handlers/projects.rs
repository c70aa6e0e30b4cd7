//! Handlers for the `/admin/projects` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pondasi_core::error::CoreError;
use pondasi_core::project::validate_category;
use pondasi_core::types::DbId;
use pondasi_db::models::project::{CreateProject, Project, ProjectImage, ProjectWithImages, UpdateProject};
use pondasi_db::repositories::{ProjectImageRepo, ProjectRepo};
use pondasi_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// Pair each project with its ordered images using one image query.
pub(crate) async fn with_images(
    pool: &DbPool,
    projects: Vec<Project>,
) -> Result<Vec<ProjectWithImages>, sqlx::Error> {
    let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
    let mut images: HashMap<DbId, Vec<ProjectImage>> = HashMap::new();
    for image in ProjectImageRepo::list_for_projects(pool, &ids).await? {
        images.entry(image.project_id).or_default().push(image);
    }

    Ok(projects
        .into_iter()
        .map(|project| ProjectWithImages {
            images: images.remove(&project.id).unwrap_or_default(),
            project,
        })
        .collect())
}

#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub category: Option<String>,
}

/// GET /api/v1/admin/projects?category=
pub async fn list(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectWithImages>>>> {
    let category = params.category.as_deref().filter(|c| !c.is_empty());
    if let Some(category) = category {
        validate_category(category)?;
    }
    let projects = ProjectRepo::list(&state.pool, category).await?;
    let data = with_images(&state.pool, projects).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_by_id(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectWithImages>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ProjectWithImages { project, images },
    }))
}

/// POST /api/v1/admin/projects
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectWithImages>>)> {
    input.validate()?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        project_id = project.id,
        category = %project.category,
        "Project created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProjectWithImages {
                project,
                images: Vec::new(),
            },
        }),
    ))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectWithImages>>> {
    input.validate()?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id).await?;
    tracing::info!(user_id = user.user_id, project_id = id, "Project updated");
    Ok(Json(DataResponse {
        data: ProjectWithImages { project, images },
    }))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Image rows cascade; files on disk are left in place.
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
