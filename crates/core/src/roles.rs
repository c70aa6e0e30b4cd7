//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the users migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Roles that may manage editorial content (articles, categories, projects, gallery).
pub fn can_edit_content(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
