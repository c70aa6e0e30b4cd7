//! Route definitions for the price calculators.

use axum::routing::post;
use axum::Router;

use crate::handlers::calculator;
use crate::state::AppState;

/// Routes mounted at `/calculator`. Public.
///
/// ```text
/// POST /asphalt   -> asphalt
/// POST /concrete  -> concrete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/asphalt", post(calculator::asphalt))
        .route("/concrete", post(calculator::concrete))
}
