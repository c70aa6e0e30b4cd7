//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

use pondasi_core::types::DbId;
use sqlx::PgPool;

pub mod article_repo;
pub mod category_repo;
pub mod gallery_repo;
pub mod organization_repo;
pub mod price_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod session_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use category_repo::CategoryRepo;
pub use gallery_repo::GalleryRepo;
pub use organization_repo::OrganizationRepo;
pub use price_repo::{AsphaltPriceRepo, ConcretePriceRepo};
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

/// Rewrite `sort_order` for the given `(id, position)` pairs of `table` in
/// a single transaction.
///
/// `table` is always a compile-time constant from a repository, never user
/// input.
pub(crate) async fn apply_sort_order(
    pool: &PgPool,
    table: &'static str,
    order: &[(DbId, i32)],
) -> Result<(), sqlx::Error> {
    let query = format!("UPDATE {table} SET sort_order = $2 WHERE id = $1");
    let mut tx = pool.begin().await?;
    for (id, position) in order {
        sqlx::query(&query)
            .bind(id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::debug!(table, rows = order.len(), "Applied sort order");
    Ok(())
}
