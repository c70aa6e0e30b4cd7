//! Article status values, excerpt derivation and SEO metadata helpers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_ARCHIVED: &str = "archived";

/// Valid article statuses. Must match `ck_articles_status`.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED, STATUS_ARCHIVED];

/// Maximum excerpt length when derived from content.
pub const EXCERPT_LENGTH: usize = 160;

/// Recommended SEO title length.
pub const MAX_META_TITLE_LENGTH: usize = 70;

/// Recommended SEO description length.
pub const MAX_META_DESCRIPTION_LENGTH: usize = 170;

/// Articles per page on the public listing.
pub const PUBLIC_PAGE_SIZE: i64 = 9;

/// Related articles shown below an article.
pub const RELATED_ARTICLES: i64 = 3;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid ws regex"));

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid article status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Strip HTML tags and common entities, collapsing whitespace.
pub fn plain_text(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    WS_RE.replace_all(decoded.trim(), " ").into_owned()
}

/// Truncate `text` to at most `max_chars` characters on a word boundary,
/// appending an ellipsis when shortened.
pub fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let at_word = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", at_word.trim_end_matches([',', '.', ';', ':', ' ']))
}

/// Use the explicit excerpt when present, otherwise derive one from the content.
pub fn resolve_excerpt(explicit: Option<&str>, content_html: &str) -> String {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(e) => e.to_string(),
        None => truncate_words(&plain_text(content_html), EXCERPT_LENGTH),
    }
}

/// SEO metadata exposed in article page props.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
}

/// Fill SEO fields from the article when the editor left them blank.
pub fn seo_meta(
    title: &str,
    excerpt: Option<&str>,
    meta_title: Option<&str>,
    meta_description: Option<&str>,
    meta_keywords: Option<&str>,
) -> SeoMeta {
    let non_empty = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

    SeoMeta {
        title: non_empty(meta_title)
            .unwrap_or_else(|| truncate_words(title, MAX_META_TITLE_LENGTH)),
        description: non_empty(meta_description).unwrap_or_else(|| {
            truncate_words(excerpt.unwrap_or_default(), MAX_META_DESCRIPTION_LENGTH)
        }),
        keywords: non_empty(meta_keywords),
    }
}
