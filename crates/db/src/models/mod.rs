//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

pub mod article;
pub mod category;
pub mod gallery;
pub mod organization;
pub mod price;
pub mod project;
pub mod session;
pub mod user;

/// Body of every `PUT .../reorder` endpoint: the complete id list of the
/// sibling group in its new display order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<pondasi_core::types::DbId>,
}

/// Deserialize a nullable field of a patch DTO so that an absent key
/// (`None`) differs from an explicit `null` (`Some(None)`).
///
/// Use with `#[serde(default, deserialize_with = "explicit_null")]`.
pub fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// `validator` hook for slug fields.
pub fn validate_slug_field(slug: &str) -> Result<(), ValidationError> {
    pondasi_core::slug::validate_slug(slug).map_err(|_| {
        let mut err = ValidationError::new("slug");
        err.message = Some("Slug may only contain lowercase letters, digits and hyphens".into());
        err
    })
}

/// `validator` hook for image path fields: must be a path under `/uploads/`
/// or an absolute http(s) URL.
pub fn validate_image_path(path: &str) -> Result<(), ValidationError> {
    let allowed_prefix = path.starts_with("/uploads/")
        || path.starts_with("http://")
        || path.starts_with("https://");
    if allowed_prefix && !path.contains("..") {
        Ok(())
    } else {
        let mut err = ValidationError::new("image_path");
        err.message = Some("Image must be an uploaded file path or an http(s) URL".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "explicit_null")]
        parent_id: Option<Option<i64>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"parent_id": 4}"#).unwrap();
        assert_eq!(absent.parent_id, None);
        assert_eq!(null.parent_id, Some(None));
        assert_eq!(value.parent_id, Some(Some(4)));
    }

    #[test]
    fn image_paths_must_be_uploads_or_urls() {
        assert!(validate_image_path("/uploads/gallery/a.webp").is_ok());
        assert!(validate_image_path("https://cdn.example.com/a.webp").is_ok());
        assert!(validate_image_path("../etc/passwd").is_err());
        assert!(validate_image_path("/uploads/../secrets.txt").is_err());
    }
}
