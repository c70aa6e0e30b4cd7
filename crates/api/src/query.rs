//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?category=` filter shared by public listings.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
    pub page: Option<i64>,
}
