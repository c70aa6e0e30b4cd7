//! Route definitions for public page payloads.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`. Unknown locales answer 404.
///
/// ```text
/// GET /{locale}/home
/// GET /{locale}/services
/// GET /{locale}/articles?category=&page=
/// GET /{locale}/articles/{slug}
/// GET /{locale}/projects?category=
/// GET /{locale}/projects/{id}
/// GET /{locale}/gallery
/// GET /{locale}/organization
/// GET /{locale}/prices
/// GET /{locale}/contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{locale}/home", get(pages::home))
        .route("/{locale}/services", get(pages::services_page))
        .route("/{locale}/articles", get(pages::articles))
        .route("/{locale}/articles/{slug}", get(pages::article_detail))
        .route("/{locale}/projects", get(pages::projects))
        .route("/{locale}/projects/{id}", get(pages::project_detail))
        .route("/{locale}/gallery", get(pages::gallery))
        .route("/{locale}/organization", get(pages::organization))
        .route("/{locale}/prices", get(pages::prices))
        .route("/{locale}/contact", get(pages::contact))
}
