//! Handler for the site search endpoint consumed by the search overlay.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use pondasi_core::article::truncate_words;
use pondasi_core::locale::{localized_path, Locale};
use pondasi_core::search::{
    clamp_limit, group_by_type, like_pattern, normalize_query, SearchResult, DEFAULT_SEARCH_LIMIT,
    MAX_SEARCH_LIMIT, TYPE_ARTICLE, TYPE_PROJECT, TYPE_SERVICE,
};
use pondasi_core::services;
use pondasi_core::types::DbId;
use pondasi_db::repositories::{ArticleRepo, ProjectImageRepo, ProjectRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

/// Length of project descriptions shown in results.
const PROJECT_DESCRIPTION_LENGTH: usize = 120;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub locale: Option<String>,
    /// Client request sequence number, echoed back unchanged.
    pub seq: Option<u64>,
    /// Maximum hits per result type.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub seq: Option<u64>,
}

/// GET /api/search?q=&locale=&seq=
///
/// Queries shorter than two characters return no results without touching
/// the database.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let locale = Locale::parse_or_default(params.locale.as_deref());

    let Some(query) = params.q.as_deref().and_then(normalize_query) else {
        return Ok(Json(SearchResponse {
            results: Vec::new(),
            seq: params.seq,
        }));
    };

    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);
    let pattern = like_pattern(&query);

    let articles = ArticleRepo::search_published(&state.pool, &pattern, limit).await?;
    let projects = ProjectRepo::search(&state.pool, &pattern, limit).await?;

    let project_ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
    let mut covers: HashMap<DbId, String> = HashMap::new();
    for image in ProjectImageRepo::list_for_projects(&state.pool, &project_ids).await? {
        covers.entry(image.project_id).or_insert(image.image_path);
    }

    let mut results = Vec::with_capacity(articles.len() + projects.len());

    results.extend(articles.into_iter().map(|a| SearchResult {
        kind: TYPE_ARTICLE,
        url: localized_path(locale, &format!("/articles/{}", a.slug)),
        title: a.title,
        description: a.excerpt,
        thumbnail: a.thumbnail,
        category: a.category_name,
    }));

    results.extend(projects.into_iter().map(|p| SearchResult {
        kind: TYPE_PROJECT,
        url: localized_path(locale, &format!("/projects/{}", p.id)),
        thumbnail: covers.remove(&p.id),
        description: p
            .location
            .clone()
            .or_else(|| {
                p.description
                    .as_deref()
                    .map(|d| truncate_words(d, PROJECT_DESCRIPTION_LENGTH))
            }),
        title: p.title,
        category: Some(p.category),
    }));

    results.extend(
        services::search(&query, locale)
            .into_iter()
            .take(limit as usize)
            .map(|s| SearchResult {
                kind: TYPE_SERVICE,
                title: s.title.to_string(),
                description: Some(s.summary.to_string()),
                thumbnail: Some(s.thumbnail.to_string()),
                url: s.url,
                category: None,
            }),
    );

    tracing::debug!(query = %query, hits = results.len(), seq = ?params.seq, "Search");

    Ok(Json(SearchResponse {
        results: group_by_type(results),
        seq: params.seq,
    }))
}
