//! Article model and DTOs.

use pondasi_core::article::validate_status;
use pondasi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::{explicit_null, validate_image_path, validate_slug_field};

/// Full article row, joined with its category's name and slug.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub status: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub published_at: Option<Timestamp>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub view_count: i64,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Article card for listings (no body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub status: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub published_at: Option<Timestamp>,
    pub view_count: i64,
}

/// Filters for the admin article list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleFilter {
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub q: Option<String>,
}

fn validate_status_field(status: &str) -> Result<(), ValidationError> {
    validate_status(status).map_err(|_| {
        let mut err = ValidationError::new("status");
        err.message = Some("Status must be one of: draft, published, archived".into());
        err
    })
}

/// Create DTO. Missing `slug` and `excerpt` are derived from the title and
/// content by the handler; `status` defaults to `draft`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticle {
    #[validate(length(min = 1, max = 255, message = "Title is required (max 255 characters)"))]
    pub title: String,
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(max = 500, message = "Excerpt is limited to 500 characters"))]
    pub excerpt: Option<String>,
    #[validate(custom(function = "validate_image_path"))]
    pub thumbnail: Option<String>,
    #[validate(custom(function = "validate_status_field"))]
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    #[validate(length(max = 70, message = "Meta title is limited to 70 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 170, message = "Meta description is limited to 170 characters"))]
    pub meta_description: Option<String>,
    #[validate(length(max = 255, message = "Meta keywords are limited to 255 characters"))]
    pub meta_keywords: Option<String>,
}

/// Resolved insert values, built by the handler from [`CreateArticle`].
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub thumbnail: Option<String>,
    pub status: String,
    pub category_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub created_by: Option<DbId>,
}

/// Patch DTO. `category_id: null` detaches the category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateArticle {
    #[validate(length(min = 1, max = 255, message = "Title is required (max 255 characters)"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,
    #[validate(length(max = 500, message = "Excerpt is limited to 500 characters"))]
    pub excerpt: Option<String>,
    #[validate(custom(function = "validate_image_path"))]
    pub thumbnail: Option<String>,
    #[validate(custom(function = "validate_status_field"))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub category_id: Option<Option<DbId>>,
    pub published_at: Option<Timestamp>,
    #[validate(length(max = 70, message = "Meta title is limited to 70 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 170, message = "Meta description is limited to 170 characters"))]
    pub meta_description: Option<String>,
    #[validate(length(max = 255, message = "Meta keywords are limited to 255 characters"))]
    pub meta_keywords: Option<String>,
}
