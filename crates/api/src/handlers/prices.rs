//! Handlers for the concrete and asphalt price lists (admin only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pondasi_core::error::CoreError;
use pondasi_core::ordering::normalize_order;
use pondasi_core::types::DbId;
use pondasi_db::models::price::{
    AsphaltPrice, ConcretePrice, CreateAsphaltPrice, CreateConcretePrice, UpdateAsphaltPrice,
    UpdateConcretePrice,
};
use pondasi_db::models::ReorderRequest;
use pondasi_db::repositories::{AsphaltPriceRepo, ConcretePriceRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

// ---------------------------------------------------------------------------
// Concrete
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/prices/concrete
pub async fn list_concrete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ConcretePrice>>>> {
    let prices = ConcretePriceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prices }))
}

/// GET /api/v1/admin/prices/concrete/{id}
pub async fn get_concrete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ConcretePrice>>> {
    let price = ConcretePriceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ConcretePrice", id))?;
    Ok(Json(DataResponse { data: price }))
}

/// POST /api/v1/admin/prices/concrete
pub async fn create_concrete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateConcretePrice>,
) -> AppResult<(StatusCode, Json<DataResponse<ConcretePrice>>)> {
    input.validate()?;
    let price = ConcretePriceRepo::create(&state.pool, &input).await?;
    tracing::info!(admin_id = admin.user_id, price_id = price.id, code = %price.code, "Concrete price created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: price })))
}

/// PUT /api/v1/admin/prices/concrete/{id}
pub async fn update_concrete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConcretePrice>,
) -> AppResult<Json<DataResponse<ConcretePrice>>> {
    input.validate()?;
    let price = ConcretePriceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("ConcretePrice", id))?;
    tracing::info!(admin_id = admin.user_id, price_id = id, "Concrete price updated");
    Ok(Json(DataResponse { data: price }))
}

/// DELETE /api/v1/admin/prices/concrete/{id}
pub async fn delete_concrete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ConcretePriceRepo::delete(&state.pool, id).await? {
        return Err(not_found("ConcretePrice", id));
    }
    tracing::info!(admin_id = admin.user_id, price_id = id, "Concrete price deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/prices/concrete/reorder
pub async fn reorder_concrete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<ConcretePrice>>>> {
    let existing = ConcretePriceRepo::ids(&state.pool).await?;
    let order = normalize_order(&existing, &input.ids)?;
    ConcretePriceRepo::reorder(&state.pool, &order).await?;
    tracing::info!(admin_id = admin.user_id, count = order.len(), "Concrete prices reordered");
    let prices = ConcretePriceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prices }))
}

// ---------------------------------------------------------------------------
// Asphalt
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/prices/asphalt
pub async fn list_asphalt(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AsphaltPrice>>>> {
    let prices = AsphaltPriceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prices }))
}

/// GET /api/v1/admin/prices/asphalt/{id}
pub async fn get_asphalt(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AsphaltPrice>>> {
    let price = AsphaltPriceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("AsphaltPrice", id))?;
    Ok(Json(DataResponse { data: price }))
}

/// POST /api/v1/admin/prices/asphalt
pub async fn create_asphalt(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateAsphaltPrice>,
) -> AppResult<(StatusCode, Json<DataResponse<AsphaltPrice>>)> {
    input.validate()?;
    let price = AsphaltPriceRepo::create(&state.pool, &input).await?;
    tracing::info!(admin_id = admin.user_id, price_id = price.id, code = %price.code, "Asphalt price created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: price })))
}

/// PUT /api/v1/admin/prices/asphalt/{id}
pub async fn update_asphalt(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAsphaltPrice>,
) -> AppResult<Json<DataResponse<AsphaltPrice>>> {
    input.validate()?;
    let price = AsphaltPriceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("AsphaltPrice", id))?;
    tracing::info!(admin_id = admin.user_id, price_id = id, "Asphalt price updated");
    Ok(Json(DataResponse { data: price }))
}

/// DELETE /api/v1/admin/prices/asphalt/{id}
pub async fn delete_asphalt(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AsphaltPriceRepo::delete(&state.pool, id).await? {
        return Err(not_found("AsphaltPrice", id));
    }
    tracing::info!(admin_id = admin.user_id, price_id = id, "Asphalt price deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/prices/asphalt/reorder
pub async fn reorder_asphalt(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<AsphaltPrice>>>> {
    let existing = AsphaltPriceRepo::ids(&state.pool).await?;
    let order = normalize_order(&existing, &input.ids)?;
    AsphaltPriceRepo::reorder(&state.pool, &order).await?;
    tracing::info!(admin_id = admin.user_id, count = order.len(), "Asphalt prices reordered");
    let prices = AsphaltPriceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prices }))
}
