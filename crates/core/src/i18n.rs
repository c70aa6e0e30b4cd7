//! Static translations for the two site locales: navigation labels and
//! organization role keys.

use serde::Serialize;

use crate::locale::{localized_path, Locale};

/// `(key, id, en)` label table for organization roles.
const ROLE_LABELS: &[(&str, &str, &str)] = &[
    ("commissioner", "Komisaris", "Commissioner"),
    ("president_commissioner", "Komisaris Utama", "President Commissioner"),
    ("president_director", "Direktur Utama", "President Director"),
    ("director", "Direktur", "Director"),
    ("finance_manager", "Manajer Keuangan", "Finance Manager"),
    ("operations_manager", "Manajer Operasional", "Operations Manager"),
    ("marketing_manager", "Manajer Pemasaran", "Marketing Manager"),
    ("project_manager", "Manajer Proyek", "Project Manager"),
    ("plant_manager", "Kepala Plant", "Plant Manager"),
    ("site_engineer", "Site Engineer", "Site Engineer"),
    ("quality_control", "Quality Control", "Quality Control"),
    ("administration", "Staf Administrasi", "Administrative Staff"),
];

/// `(key, path, id, en)` table for the main navigation.
const NAV_ITEMS: &[(&str, &str, &str, &str)] = &[
    ("home", "/", "Beranda", "Home"),
    ("services", "/services", "Layanan", "Services"),
    ("projects", "/projects", "Proyek", "Projects"),
    ("articles", "/articles", "Artikel", "Articles"),
    ("gallery", "/gallery", "Galeri", "Gallery"),
    ("organization", "/organization", "Struktur Organisasi", "Organization"),
    ("prices", "/prices", "Daftar Harga", "Price List"),
    ("contact", "/contact", "Kontak", "Contact"),
];

fn pick<'a>(locale: Locale, id: &'a str, en: &'a str) -> &'a str {
    match locale {
        Locale::Id => id,
        Locale::En => en,
    }
}

/// Translate a role key. Unknown keys return `None`.
pub fn role_label(key: &str, locale: Locale) -> Option<&'static str> {
    ROLE_LABELS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|&(_, id, en)| pick(locale, id, en))
}

/// Whether `key` is a known role translation key.
pub fn is_known_role_key(key: &str) -> bool {
    ROLE_LABELS.iter().any(|(k, _, _)| *k == key)
}

/// Label shown for an organization member: the translated role key when it
/// is known, else the free-text role.
pub fn display_role(role: &str, role_key: Option<&str>, locale: Locale) -> String {
    role_key
        .and_then(|k| role_label(k, locale))
        .map(str::to_string)
        .unwrap_or_else(|| role.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub href: String,
}

/// The main navigation menu for `locale`.
pub fn navigation(locale: Locale) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .map(|&(key, path, id, en)| NavItem {
            key,
            label: pick(locale, id, en),
            href: localized_path(locale, path),
        })
        .collect()
}
