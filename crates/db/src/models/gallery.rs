//! Company gallery photo model and DTOs.

use pondasi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::validate_image_path;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryPhoto {
    pub id: DbId,
    pub image_path: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryPhoto {
    #[validate(custom(function = "validate_image_path"))]
    pub image_path: String,
    #[validate(length(max = 255, message = "Caption is limited to 255 characters"))]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGalleryPhoto {
    #[validate(custom(function = "validate_image_path"))]
    pub image_path: Option<String>,
    #[validate(length(max = 255, message = "Caption is limited to 255 characters"))]
    pub caption: Option<String>,
}
