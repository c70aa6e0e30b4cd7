//! Repository for the `organization_members` table.

use std::collections::HashMap;

use pondasi_core::types::DbId;
use sqlx::PgPool;

use super::apply_sort_order;
use crate::models::organization::{
    CreateOrganizationMember, OrganizationMember, UpdateOrganizationMember,
};

const COLUMNS: &str =
    "id, name, role, role_key, parent_id, photo, sort_order, created_at, updated_at";

pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Every member as a flat list, ordered for tree construction.
    pub async fn list(pool: &PgPool) -> Result<Vec<OrganizationMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organization_members
             ORDER BY parent_id NULLS FIRST, sort_order, id"
        );
        sqlx::query_as::<_, OrganizationMember>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrganizationMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organization_members WHERE id = $1");
        sqlx::query_as::<_, OrganizationMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// `id -> parent_id` for every member, used for cycle checks.
    pub async fn parent_map(pool: &PgPool) -> Result<HashMap<DbId, Option<DbId>>, sqlx::Error> {
        let rows: Vec<(DbId, Option<DbId>)> =
            sqlx::query_as("SELECT id, parent_id FROM organization_members")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Ids of the members sharing `parent_id`, in current display order.
    pub async fn sibling_ids(
        pool: &PgPool,
        parent_id: Option<DbId>,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM organization_members
             WHERE parent_id IS NOT DISTINCT FROM $1
             ORDER BY sort_order, id",
        )
        .bind(parent_id)
        .fetch_all(pool)
        .await
    }

    /// Insert a member at the end of its sibling group.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganizationMember,
    ) -> Result<OrganizationMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO organization_members (name, role, role_key, parent_id, photo, sort_order)
             VALUES ($1, $2, $3, $4, $5,
                     COALESCE((SELECT MAX(sort_order) FROM organization_members
                               WHERE parent_id IS NOT DISTINCT FROM $4), 0) + 1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationMember>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.role_key)
            .bind(input.parent_id)
            .bind(&input.photo)
            .fetch_one(pool)
            .await
    }

    /// Update a member. `parent_id: Some(None)` moves it to the top level.
    /// Acyclicity must be checked by the caller.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganizationMember,
    ) -> Result<Option<OrganizationMember>, sqlx::Error> {
        let query = format!(
            "UPDATE organization_members SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                role_key = COALESCE($4, role_key),
                parent_id = CASE WHEN $5 THEN $6 ELSE parent_id END,
                photo = COALESCE($7, photo)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.role_key)
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .bind(&input.photo)
            .fetch_optional(pool)
            .await
    }

    /// Delete a member. Its direct reports become top-level members.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM organization_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn reorder(pool: &PgPool, order: &[(DbId, i32)]) -> Result<(), sqlx::Error> {
        apply_sort_order(pool, "organization_members", order).await
    }
}
