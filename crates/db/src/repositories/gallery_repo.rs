//! Repository for the `gallery_photos` table.

use pondasi_core::types::DbId;
use sqlx::PgPool;

use super::apply_sort_order;
use crate::models::gallery::{CreateGalleryPhoto, GalleryPhoto, UpdateGalleryPhoto};

const COLUMNS: &str = "id, image_path, caption, sort_order, created_at, updated_at";

pub struct GalleryRepo;

impl GalleryRepo {
    /// Photos in display order; `limit: None` returns all of them.
    pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<GalleryPhoto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_photos ORDER BY sort_order, id LIMIT $1");
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_photos WHERE id = $1");
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a photo after the current last one.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryPhoto,
    ) -> Result<GalleryPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_photos (image_path, caption, sort_order)
             VALUES ($1, $2, COALESCE((SELECT MAX(sort_order) FROM gallery_photos), 0) + 1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(&input.image_path)
            .bind(&input.caption)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryPhoto,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_photos SET
                image_path = COALESCE($2, image_path),
                caption = COALESCE($3, caption)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(id)
            .bind(&input.image_path)
            .bind(&input.caption)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM gallery_photos ORDER BY sort_order, id")
            .fetch_all(pool)
            .await
    }

    pub async fn reorder(pool: &PgPool, order: &[(DbId, i32)]) -> Result<(), sqlx::Error> {
        apply_sort_order(pool, "gallery_photos", order).await
    }
}
