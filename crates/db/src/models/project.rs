//! Project portfolio model, its ordered images, and DTOs.

use chrono::NaiveDate;
use pondasi_core::project::validate_category;
use pondasi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::validate_image_path;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub location: Option<String>,
    pub project_date: Option<NaiveDate>,
    pub category: String,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    pub image_path: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project together with its images in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithImages {
    #[serde(flatten)]
    pub project: Project,
    pub images: Vec<ProjectImage>,
}

fn validate_category_field(category: &str) -> Result<(), ValidationError> {
    validate_category(category).map_err(|_| {
        let mut err = ValidationError::new("category");
        err.message = Some(
            "Category must be one of: construction, batching_plant, asphalt_mixing_plant".into(),
        );
        err
    })
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255, message = "Title is required (max 255 characters)"))]
    pub title: String,
    #[validate(length(max = 255, message = "Location is limited to 255 characters"))]
    pub location: Option<String>,
    pub project_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_category_field"))]
    pub category: String,
    #[validate(length(max = 100, message = "Subcategory is limited to 100 characters"))]
    pub subcategory: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255, message = "Title is required (max 255 characters)"))]
    pub title: Option<String>,
    #[validate(length(max = 255, message = "Location is limited to 255 characters"))]
    pub location: Option<String>,
    pub project_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_category_field"))]
    pub category: Option<String>,
    #[validate(length(max = 100, message = "Subcategory is limited to 100 characters"))]
    pub subcategory: Option<String>,
    pub description: Option<String>,
}

/// Body of `POST /projects/{id}/images`. Images are appended after the
/// current last one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectImage {
    #[validate(custom(function = "validate_image_path"))]
    pub image_path: String,
    #[validate(length(max = 255, message = "Caption is limited to 255 characters"))]
    pub caption: Option<String>,
}
