//! Handlers for the `/admin/articles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pondasi_core::article::{resolve_excerpt, STATUS_DRAFT};
use pondasi_core::error::CoreError;
use pondasi_core::search::{
    clamp_limit, clamp_offset, like_pattern, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use pondasi_core::slug::resolve_slug;
use pondasi_core::types::DbId;
use pondasi_db::models::article::{
    Article, ArticleFilter, ArticleSummary, CreateArticle, NewArticle, UpdateArticle,
};
use pondasi_db::repositories::ArticleRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/articles?status=&category_id=&q=&limit=&offset=
pub async fn list(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> AppResult<Json<DataResponse<Vec<ArticleSummary>>>> {
    let pattern = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(like_pattern);
    let filter = ArticleFilter {
        status: params.status,
        category_id: params.category_id,
        q: params.q,
    };
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let articles = ArticleRepo::list(&state.pool, &filter, pattern.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/v1/admin/articles/{id}
pub async fn get_by_id(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Article>>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: article }))
}

/// POST /api/v1/admin/articles
///
/// Slug and excerpt are derived from the title and content when omitted.
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<(StatusCode, Json<DataResponse<Article>>)> {
    input.validate()?;

    let new_article = NewArticle {
        slug: resolve_slug(input.slug.as_deref(), &input.title)?,
        excerpt: resolve_excerpt(input.excerpt.as_deref(), &input.content),
        status: input.status.unwrap_or_else(|| STATUS_DRAFT.to_string()),
        title: input.title,
        content: input.content,
        thumbnail: input.thumbnail,
        category_id: input.category_id,
        published_at: input.published_at,
        meta_title: input.meta_title,
        meta_description: input.meta_description,
        meta_keywords: input.meta_keywords,
        created_by: Some(user.user_id),
    };

    let article = ArticleRepo::create(&state.pool, &new_article).await?;
    tracing::info!(
        user_id = user.user_id,
        article_id = article.id,
        status = %article.status,
        "Article created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /api/v1/admin/articles/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<Json<DataResponse<Article>>> {
    input.validate()?;
    let article = ArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = user.user_id, article_id = id, "Article updated");
    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/admin/articles/{id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ArticleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, article_id = id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}
