//! The two fixed site locales and locale-prefixed path helpers.
//!
//! Every public route is prefixed with its locale (`/id/...`, `/en/...`).
//! Indonesian is the default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Id,
    En,
}

/// All supported locales, default first.
pub const LOCALES: [Locale; 2] = [Locale::Id, Locale::En];

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::En => "en",
        }
    }

    /// The locale the language toggle switches to.
    pub fn other(self) -> Locale {
        match self {
            Locale::Id => Locale::En,
            Locale::En => Locale::Id,
        }
    }

    /// Parse an optional query value, falling back to the default locale.
    pub fn parse_or_default(value: Option<&str>) -> Locale {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Locale::Id),
            "en" => Ok(Locale::En),
            other => Err(CoreError::Validation(format!(
                "Unsupported locale '{other}'. Must be one of: id, en"
            ))),
        }
    }
}

/// Build a locale-prefixed path: `localized_path(En, "/projects/3")` is `/en/projects/3`.
pub fn localized_path(locale: Locale, path: &str) -> String {
    let rest = path.trim_start_matches('/');
    if rest.is_empty() {
        format!("/{locale}")
    } else {
        format!("/{locale}/{rest}")
    }
}

/// Rewrite the leading locale segment of `path` to `target`.
///
/// Paths without a locale prefix get one. Query strings are preserved.
pub fn switch_locale_path(path: &str, target: Locale) -> String {
    let (path_part, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };

    let trimmed = path_part.trim_start_matches('/');
    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };

    let remainder = if first.parse::<Locale>().is_ok() {
        rest
    } else {
        trimmed
    };

    let mut out = localized_path(target, remainder);
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_locales_case_insensitively() {
        assert_eq!("id".parse::<Locale>().unwrap(), Locale::Id);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn unknown_query_value_falls_back_to_default() {
        assert_eq!(Locale::parse_or_default(Some("de")), Locale::Id);
        assert_eq!(Locale::parse_or_default(None), Locale::Id);
        assert_eq!(Locale::parse_or_default(Some("en")), Locale::En);
    }

    #[test]
    fn localized_path_handles_root() {
        assert_eq!(localized_path(Locale::En, "/"), "/en");
        assert_eq!(localized_path(Locale::Id, "projects/3"), "/id/projects/3");
    }

    #[test]
    fn switch_replaces_existing_prefix() {
        assert_eq!(
            switch_locale_path("/id/articles/beton-k300", Locale::En),
            "/en/articles/beton-k300"
        );
        assert_eq!(switch_locale_path("/en", Locale::Id), "/id");
    }

    #[test]
    fn switch_adds_missing_prefix_and_keeps_query() {
        assert_eq!(
            switch_locale_path("/articles?page=2", Locale::En),
            "/en/articles?page=2"
        );
    }
}
