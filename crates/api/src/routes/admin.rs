//! Route definitions for admin-only resources: price lists and the
//! organization chart.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{organization, prices};
use crate::state::AppState;

/// Routes mounted at `/admin/prices`.
///
/// ```text
/// GET, POST          /concrete
/// PUT                /concrete/reorder
/// GET, PUT, DELETE   /concrete/{id}
/// GET, POST          /asphalt
/// PUT                /asphalt/reorder
/// GET, PUT, DELETE   /asphalt/{id}
/// ```
pub fn prices_router() -> Router<AppState> {
    Router::new()
        .route(
            "/concrete",
            get(prices::list_concrete).post(prices::create_concrete),
        )
        .route("/concrete/reorder", put(prices::reorder_concrete))
        .route(
            "/concrete/{id}",
            get(prices::get_concrete)
                .put(prices::update_concrete)
                .delete(prices::delete_concrete),
        )
        .route(
            "/asphalt",
            get(prices::list_asphalt).post(prices::create_asphalt),
        )
        .route("/asphalt/reorder", put(prices::reorder_asphalt))
        .route(
            "/asphalt/{id}",
            get(prices::get_asphalt)
                .put(prices::update_asphalt)
                .delete(prices::delete_asphalt),
        )
}

/// Routes mounted at `/admin/organization`.
///
/// ```text
/// GET, POST          /
/// GET                /tree
/// PUT                /reorder
/// GET, PUT, DELETE   /{id}
/// ```
pub fn organization_router() -> Router<AppState> {
    Router::new()
        .route("/", get(organization::list).post(organization::create))
        .route("/tree", get(organization::tree))
        .route("/reorder", put(organization::reorder))
        .route(
            "/{id}",
            get(organization::get_by_id)
                .put(organization::update)
                .delete(organization::delete),
        )
}
