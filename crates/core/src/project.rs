//! Project categories.

use crate::error::CoreError;

pub const CATEGORY_CONSTRUCTION: &str = "construction";
pub const CATEGORY_BATCHING_PLANT: &str = "batching_plant";
pub const CATEGORY_ASPHALT_MIXING_PLANT: &str = "asphalt_mixing_plant";

/// Valid project categories. Must match `ck_projects_category`.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_CONSTRUCTION,
    CATEGORY_BATCHING_PLANT,
    CATEGORY_ASPHALT_MIXING_PLANT,
];

/// Projects listed on the home page.
pub const HOME_PROJECT_COUNT: i64 = 6;

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid project category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}
