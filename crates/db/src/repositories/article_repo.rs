//! Repository for the `articles` table.
//!
//! Every read joins `categories` so rows carry the category name and slug.

use pondasi_core::article::STATUS_PUBLISHED;
use pondasi_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, ArticleFilter, ArticleSummary, NewArticle, UpdateArticle};

const COLUMNS: &str = "a.id, a.title, a.slug, a.content, a.excerpt, a.thumbnail, a.status, \
                       a.category_id, c.name AS category_name, c.slug AS category_slug, \
                       a.published_at, a.meta_title, a.meta_description, a.meta_keywords, \
                       a.view_count, a.created_by, a.created_at, a.updated_at";

const SUMMARY_COLUMNS: &str = "a.id, a.title, a.slug, a.excerpt, a.thumbnail, a.status, \
                               a.category_id, c.name AS category_name, c.slug AS category_slug, \
                               a.published_at, a.view_count";

const JOIN: &str = "LEFT JOIN categories c ON c.id = a.category_id";

const PUBLISHED_ORDER: &str = "ORDER BY a.published_at DESC NULLS LAST, a.id DESC";

pub struct ArticleRepo;

impl ArticleRepo {
    /// Admin listing, newest first, with optional status / category / title
    /// filters. `title_pattern` must already be an escaped `ILIKE` pattern.
    pub async fn list(
        pool: &PgPool,
        filter: &ArticleFilter,
        title_pattern: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM articles a {JOIN}
             WHERE ($1::text IS NULL OR a.status = $1)
               AND ($2::bigint IS NULL OR a.category_id = $2)
               AND ($3::text IS NULL OR a.title ILIKE $3)
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, ArticleSummary>(&query)
            .bind(&filter.status)
            .bind(filter.category_id)
            .bind(title_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles a {JOIN} WHERE a.id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published articles, optionally restricted to one category slug.
    pub async fn list_published(
        pool: &PgPool,
        category_slug: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM articles a {JOIN}
             WHERE a.status = $1 AND ($2::text IS NULL OR c.slug = $2)
             {PUBLISHED_ORDER}
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ArticleSummary>(&query)
            .bind(STATUS_PUBLISHED)
            .bind(category_slug)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total for [`Self::list_published`] pagination.
    pub async fn count_published(
        pool: &PgPool,
        category_slug: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM articles a {JOIN}
             WHERE a.status = $1 AND ($2::text IS NULL OR c.slug = $2)"
        );
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(STATUS_PUBLISHED)
            .bind(category_slug)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// A published article by slug. Drafts and archived articles are not
    /// visible publicly.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles a {JOIN} WHERE a.slug = $1 AND a.status = $2"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .bind(STATUS_PUBLISHED)
            .fetch_optional(pool)
            .await
    }

    /// Increment the view counter, returning the new value.
    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "UPDATE articles SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Other published articles in the same category, newest first.
    /// Uncategorized articles have no related articles.
    pub async fn related(
        pool: &PgPool,
        article_id: DbId,
        category_id: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let Some(category_id) = category_id else {
            return Ok(Vec::new());
        };
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM articles a {JOIN}
             WHERE a.status = $1 AND a.category_id = $2 AND a.id <> $3
             {PUBLISHED_ORDER}
             LIMIT $4"
        );
        sqlx::query_as::<_, ArticleSummary>(&query)
            .bind(STATUS_PUBLISHED)
            .bind(category_id)
            .bind(article_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Published articles whose title, excerpt or content match `pattern`
    /// (an escaped `ILIKE` pattern).
    pub async fn search_published(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM articles a {JOIN}
             WHERE a.status = $1
               AND (a.title ILIKE $2 OR a.excerpt ILIKE $2 OR a.content ILIKE $2)
             {PUBLISHED_ORDER}
             LIMIT $3"
        );
        sqlx::query_as::<_, ArticleSummary>(&query)
            .bind(STATUS_PUBLISHED)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Insert an article. Publishing without an explicit `published_at`
    /// stamps the current time.
    pub async fn create(pool: &PgPool, input: &NewArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                INSERT INTO articles
                    (title, slug, content, excerpt, thumbnail, status, category_id,
                     published_at, meta_title, meta_description, meta_keywords, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7,
                        COALESCE($8, CASE WHEN $6 = '{STATUS_PUBLISHED}' THEN NOW() END),
                        $9, $10, $11, $12)
                RETURNING *
             )
             SELECT {COLUMNS} FROM a {JOIN}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.thumbnail)
            .bind(&input.status)
            .bind(input.category_id)
            .bind(input.published_at)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Update an article. Only non-`None` fields in `input` are applied;
    /// `category_id: Some(None)` clears the category. The first transition
    /// to `published` stamps `published_at` unless one is given.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                UPDATE articles SET
                    title = COALESCE($2, title),
                    slug = COALESCE($3, slug),
                    content = COALESCE($4, content),
                    excerpt = COALESCE($5, excerpt),
                    thumbnail = COALESCE($6, thumbnail),
                    status = COALESCE($7, status),
                    category_id = CASE WHEN $8 THEN $9 ELSE category_id END,
                    published_at = COALESCE(
                        $10,
                        published_at,
                        CASE WHEN COALESCE($7, status) = '{STATUS_PUBLISHED}' THEN NOW() END
                    ),
                    meta_title = COALESCE($11, meta_title),
                    meta_description = COALESCE($12, meta_description),
                    meta_keywords = COALESCE($13, meta_keywords)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM a {JOIN}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.thumbnail)
            .bind(&input.status)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(input.published_at)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
