//! Article category model and DTOs.

use pondasi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::validate_slug_field;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create DTO. A missing `slug` is generated from `name` by the handler.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100, message = "Name is required (max 100 characters)"))]
    pub name: String,
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[validate(length(max = 500, message = "Description is limited to 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100, message = "Name is required (max 100 characters)"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[validate(length(max = 500, message = "Description is limited to 500 characters"))]
    pub description: Option<String>,
}
