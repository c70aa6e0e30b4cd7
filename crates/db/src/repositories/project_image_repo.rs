//! Repository for the `project_images` table.

use pondasi_core::types::DbId;
use sqlx::PgPool;

use super::apply_sort_order;
use crate::models::project::{CreateProjectImage, ProjectImage};

const COLUMNS: &str = "id, project_id, image_path, caption, sort_order, created_at, updated_at";

pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Images of one project in display order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE project_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Images of several projects at once, grouped by project and in
    /// display order within each project.
    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE project_id = ANY($1)
             ORDER BY project_id, sort_order, id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// Append an image after the project's current last image.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectImage,
    ) -> Result<ProjectImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_images (project_id, image_path, caption, sort_order)
             VALUES ($1, $2, $3,
                     COALESCE((SELECT MAX(sort_order) FROM project_images WHERE project_id = $1), 0) + 1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(&input.image_path)
            .bind(&input.caption)
            .fetch_one(pool)
            .await
    }

    /// Delete one image of a project. Returns `false` when the image does
    /// not exist or belongs to another project.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_images WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids of the project's images in current display order.
    pub async fn ids_for_project(pool: &PgPool, project_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM project_images WHERE project_id = $1 ORDER BY sort_order, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Persist a normalized order (see `pondasi_core::ordering`).
    pub async fn reorder(pool: &PgPool, order: &[(DbId, i32)]) -> Result<(), sqlx::Error> {
        apply_sort_order(pool, "project_images", order).await
    }
}
