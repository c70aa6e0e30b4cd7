//! Site search constants and helpers.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and the headless search overlay model.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Queries shorter than this (after trimming) never hit the database.
pub const MIN_QUERY_LENGTH: usize = 2;

/// Maximum accepted query length; longer input is truncated.
pub const MAX_QUERY_LENGTH: usize = 100;

/// Default number of results per entity type.
pub const DEFAULT_SEARCH_LIMIT: i64 = 5;

/// Maximum number of results per entity type.
pub const MAX_SEARCH_LIMIT: i64 = 20;

/// Default page size for admin list endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for admin list endpoints.
pub const MAX_LIST_LIMIT: i64 = 200;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

pub const TYPE_ARTICLE: &str = "article";
pub const TYPE_PROJECT: &str = "project";
pub const TYPE_SERVICE: &str = "service";

/// Display order of result groups.
pub const RESULT_TYPE_ORDER: &[&str] = &[TYPE_ARTICLE, TYPE_PROJECT, TYPE_SERVICE];

/// One search hit as consumed by the search overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub url: String,
    pub category: Option<String>,
}

/// Stable sort of results into type groups following [`RESULT_TYPE_ORDER`].
pub fn group_by_type(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    let rank = |kind: &str| {
        RESULT_TYPE_ORDER
            .iter()
            .position(|t| *t == kind)
            .unwrap_or(RESULT_TYPE_ORDER.len())
    };
    results.sort_by_key(|r| rank(r.kind));
    results
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

/// Trim and bound the raw query. Returns `None` when the query is too short
/// to search.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_QUERY_LENGTH {
        return None;
    }
    Some(trimmed.chars().take(MAX_QUERY_LENGTH).collect())
}

/// Build an `ILIKE` pattern matching `query` anywhere, escaping LIKE
/// wildcards in the user input (`\` is the default escape character).
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Offset for a 1-based page number. Saturates for absurd page numbers.
pub fn page_offset(page: Option<i64>, per_page: i64) -> i64 {
    (page.unwrap_or(1).max(1) - 1).saturating_mul(per_page.max(0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(kind: &'static str, title: &str) -> SearchResult {
        SearchResult {
            kind,
            title: title.to_string(),
            description: None,
            thumbnail: None,
            url: format!("/id/{title}"),
            category: None,
        }
    }

    #[test]
    fn short_queries_are_rejected() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query(" a "), None);
        assert_eq!(normalize_query(" ab "), Some("ab".to_string()));
    }

    #[test]
    fn long_queries_are_truncated() {
        let q = "x".repeat(MAX_QUERY_LENGTH + 20);
        assert_eq!(normalize_query(&q).unwrap().len(), MAX_QUERY_LENGTH);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("beton"), "%beton%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn grouping_is_stable_within_type() {
        let grouped = group_by_type(vec![
            hit(TYPE_SERVICE, "s1"),
            hit(TYPE_PROJECT, "p1"),
            hit(TYPE_ARTICLE, "a1"),
            hit(TYPE_PROJECT, "p2"),
            hit(TYPE_ARTICLE, "a2"),
        ]);
        let titles: Vec<_> = grouped.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "a2", "p1", "p2", "s1"]);
    }

    #[test]
    fn clamp_helpers() {
        assert_eq!(clamp_limit(None, 5, 20), 5);
        assert_eq!(clamp_limit(Some(0), 5, 20), 1);
        assert_eq!(clamp_limit(Some(500), 5, 20), 20);
        assert_eq!(clamp_offset(Some(-3)), 0);
        assert_eq!(page_offset(Some(3), 9), 18);
        assert_eq!(page_offset(Some(0), 9), 0);
    }

    #[test]
    fn huge_page_numbers_saturate() {
        assert_eq!(page_offset(Some(i64::MAX), 9), i64::MAX);
        assert_eq!(page_offset(Some(i64::MIN), 9), 0);
    }
}
