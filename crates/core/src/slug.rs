//! URL slug generation and validation for articles and categories.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum slug length.
pub const MAX_SLUG_LENGTH: usize = 200;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Generate a URL-safe slug from a title.
///
/// Lowercases, replaces non-alphanumeric characters with hyphens, collapses
/// consecutive hyphens, and trims leading/trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut result = String::with_capacity(slug.len());
    let mut prev_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    let trimmed = result.trim_matches('-');
    if trimmed.len() > MAX_SLUG_LENGTH {
        trimmed[..MAX_SLUG_LENGTH].trim_end_matches('-').to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate a client-supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug exceeds maximum length of {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Use `explicit` when given (after validation), otherwise derive from `title`.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => {
            validate_slug(s)?;
            Ok(s.to_string())
        }
        None => {
            let generated = generate_slug(title);
            if generated.is_empty() {
                return Err(CoreError::Validation(
                    "Cannot derive a slug from the title; provide one explicitly".to_string(),
                ));
            }
            Ok(generated)
        }
    }
}
