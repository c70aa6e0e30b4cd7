//! Organization chart member model and DTOs.

use pondasi_core::org_tree::TreeRecord;
use pondasi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{explicit_null, validate_image_path};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationMember {
    pub id: DbId,
    pub name: String,
    /// Free-text role label as entered by the admin.
    pub role: String,
    /// Optional translation key (see `pondasi_core::i18n`).
    pub role_key: Option<String>,
    pub parent_id: Option<DbId>,
    pub photo: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TreeRecord for OrganizationMember {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganizationMember {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Role is required (max 255 characters)"))]
    pub role: String,
    #[validate(length(max = 100, message = "Role key is limited to 100 characters"))]
    pub role_key: Option<String>,
    pub parent_id: Option<DbId>,
    #[validate(custom(function = "validate_image_path"))]
    pub photo: Option<String>,
}

/// Patch DTO. `parent_id: null` moves the member to the top level.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOrganizationMember {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Role is required (max 255 characters)"))]
    pub role: Option<String>,
    #[validate(length(max = 100, message = "Role key is limited to 100 characters"))]
    pub role_key: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub parent_id: Option<Option<DbId>>,
    #[validate(custom(function = "validate_image_path"))]
    pub photo: Option<String>,
}

/// Member as rendered on the public organization page.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationMemberView {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub photo: Option<String>,
}
