//! Route definitions for editor-managed content: categories, articles,
//! projects with their images, and the gallery.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{articles, categories, gallery, project_images, projects};
use crate::state::AppState;

/// Routes mounted at `/admin/categories`.
///
/// ```text
/// GET, POST          /
/// GET, PUT, DELETE   /{id}
/// ```
pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
}

/// Routes mounted at `/admin/articles`.
///
/// ```text
/// GET, POST          /?status=&category_id=&q=&limit=&offset=
/// GET, PUT, DELETE   /{id}
/// ```
pub fn articles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::list).post(articles::create))
        .route(
            "/{id}",
            get(articles::get_by_id)
                .put(articles::update)
                .delete(articles::delete),
        )
}

/// Routes mounted at `/admin/projects`.
///
/// ```text
/// GET, POST          /?category=
/// GET, PUT, DELETE   /{id}
/// GET, POST          /{id}/images
/// PUT                /{id}/images/reorder
/// DELETE             /{id}/images/{image_id}
/// ```
pub fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/{id}/images",
            get(project_images::list).post(project_images::add),
        )
        .route("/{id}/images/reorder", put(project_images::reorder))
        .route("/{id}/images/{image_id}", delete(project_images::delete))
}

/// Routes mounted at `/admin/gallery`.
///
/// ```text
/// GET, POST          /
/// PUT                /reorder
/// GET, PUT, DELETE   /{id}
/// ```
pub fn gallery_router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list).post(gallery::create))
        .route("/reorder", put(gallery::reorder))
        .route(
            "/{id}",
            get(gallery::get_by_id)
                .put(gallery::update)
                .delete(gallery::delete),
        )
}
