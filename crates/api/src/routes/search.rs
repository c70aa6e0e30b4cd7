//! Route definitions for site search.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Mounted at the root, next to `/health`.
///
/// ```text
/// GET /api/search?q=&locale=&seq=&limit=  -> search
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/api/search", get(search::search))
}
