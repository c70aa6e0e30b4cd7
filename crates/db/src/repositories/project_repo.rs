//! Repository for the `projects` table.

use pondasi_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

const COLUMNS: &str = "id, title, location, project_date, category, subcategory, description, \
                       created_at, updated_at";

/// Most recent work first; undated projects last.
const ORDER: &str = "ORDER BY project_date DESC NULLS LAST, id DESC";

pub struct ProjectRepo;

impl ProjectRepo {
    /// List projects, optionally restricted to one category.
    pub async fn list(pool: &PgPool, category: Option<&str>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::text IS NULL OR category = $1)
             {ORDER}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recent projects.
    pub async fn latest(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects {ORDER} LIMIT $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Projects whose title, location or description match `pattern`
    /// (an escaped `ILIKE` pattern).
    pub async fn search(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE title ILIKE $1 OR location ILIKE $1 OR description ILIKE $1
             {ORDER}
             LIMIT $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, location, project_date, category, subcategory, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.location)
            .bind(input.project_date)
            .bind(&input.category)
            .bind(&input.subcategory)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                location = COALESCE($3, location),
                project_date = COALESCE($4, project_date),
                category = COALESCE($5, category),
                subcategory = COALESCE($6, subcategory),
                description = COALESCE($7, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.location)
            .bind(input.project_date)
            .bind(&input.category)
            .bind(&input.subcategory)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and, through the cascade, its image rows.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
