pub mod admin;
pub mod auth;
pub mod calculator;
pub mod content;
pub mod health;
pub mod pages;
pub mod search;
pub mod uploads;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
///
/// /pages/{locale}/...                              public page payloads
///
/// /calculator/asphalt                              asphalt quote (public)
/// /calculator/concrete                             concrete quote (public)
///
/// /admin/categories                                editor
/// /admin/articles                                  editor
/// /admin/projects (+ /{id}/images)                 editor
/// /admin/gallery                                   editor
/// /admin/uploads/image|images                      editor
/// /admin/prices/concrete|asphalt                   admin
/// /admin/organization                              admin
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Public page props.
        .nest("/pages", pages::router())
        // Stateless price calculators.
        .nest("/calculator", calculator::router())
        // Editor-managed content.
        .nest("/admin/categories", content::categories_router())
        .nest("/admin/articles", content::articles_router())
        .nest("/admin/projects", content::projects_router())
        .nest("/admin/gallery", content::gallery_router())
        .nest("/admin/uploads", uploads::router(&config.upload))
        // Admin-only resources.
        .nest("/admin/prices", admin::prices_router())
        .nest("/admin/organization", admin::organization_router())
}
