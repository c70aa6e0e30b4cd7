//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Public page payload: page-specific `props` plus the `shared` globals
/// every page receives. Sent as `{"data": {"props": ..., "shared": ...}}`.
#[derive(Debug, Serialize)]
pub struct PagePayload<P: Serialize, S: Serialize> {
    pub props: P,
    pub shared: S,
}

/// Pagination metadata for paged listings.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: i64, total: i64) -> Self {
        let per_page = per_page.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            per_page,
            total,
            total_pages: (total + per_page - 1) / per_page,
        }
    }
}
