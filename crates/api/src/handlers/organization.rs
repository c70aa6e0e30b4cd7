//! Handlers for the organization chart (admin only).
//!
//! Members form a forest through `parent_id`. Parent changes are checked
//! against the stored tree so a member can never become its own ancestor.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pondasi_core::error::CoreError;
use pondasi_core::ordering::normalize_order;
use pondasi_core::org_tree::{build_tree, validate_parent, TreeNode};
use pondasi_core::types::DbId;
use pondasi_db::models::organization::{
    CreateOrganizationMember, OrganizationMember, UpdateOrganizationMember,
};
use pondasi_db::models::ReorderRequest;
use pondasi_db::repositories::OrganizationRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "OrganizationMember",
        id,
    })
}

/// GET /api/v1/admin/organization
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<OrganizationMember>>>> {
    let members = OrganizationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/admin/organization/tree
pub async fn tree(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TreeNode<OrganizationMember>>>>> {
    let members = OrganizationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: build_tree(members),
    }))
}

/// GET /api/v1/admin/organization/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OrganizationMember>>> {
    let member = OrganizationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/admin/organization
///
/// New members are appended to their sibling group. An unknown
/// `parent_id` is rejected by the foreign key.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateOrganizationMember>,
) -> AppResult<(StatusCode, Json<DataResponse<OrganizationMember>>)> {
    input.validate()?;
    let member = OrganizationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        member_id = member.id,
        parent_id = ?member.parent_id,
        "Organization member created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/admin/organization/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrganizationMember>,
) -> AppResult<Json<DataResponse<OrganizationMember>>> {
    input.validate()?;

    if let Some(new_parent) = input.parent_id {
        let parents = OrganizationRepo::parent_map(&state.pool).await?;
        if !parents.contains_key(&id) {
            return Err(not_found(id));
        }
        validate_parent(&parents, id, new_parent)?;
    }

    let member = OrganizationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        admin_id = admin.user_id,
        member_id = id,
        parent_id = ?member.parent_id,
        "Organization member updated"
    );
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/organization/{id}
///
/// Direct reports of the deleted member become top-level members.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !OrganizationRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(admin_id = admin.user_id, member_id = id, "Organization member deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/organization/reorder
///
/// Reorders one sibling group. The group is the one containing the first
/// listed id, and the body must list all of its members.
pub async fn reorder(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<OrganizationMember>>>> {
    let Some(&first) = input.ids.first() else {
        return Err(AppError::BadRequest("Reorder request must not be empty".into()));
    };
    let anchor = OrganizationRepo::find_by_id(&state.pool, first)
        .await?
        .ok_or_else(|| not_found(first))?;

    let siblings = OrganizationRepo::sibling_ids(&state.pool, anchor.parent_id).await?;
    let order = normalize_order(&siblings, &input.ids)?;
    OrganizationRepo::reorder(&state.pool, &order).await?;
    tracing::info!(
        admin_id = admin.user_id,
        parent_id = ?anchor.parent_id,
        count = order.len(),
        "Organization siblings reordered"
    );

    let members = OrganizationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: members }))
}
