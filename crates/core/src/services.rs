//! The company's service catalog.
//!
//! Services are static content; the search endpoint and the services and
//! home pages read them from here.

use serde::Serialize;

use crate::locale::{localized_path, Locale};
use crate::project::{CATEGORY_ASPHALT_MIXING_PLANT, CATEGORY_BATCHING_PLANT, CATEGORY_CONSTRUCTION};

struct ServiceDef {
    key: &'static str,
    project_category: Option<&'static str>,
    title_id: &'static str,
    title_en: &'static str,
    summary_id: &'static str,
    summary_en: &'static str,
    thumbnail: &'static str,
}

const SERVICES: &[ServiceDef] = &[
    ServiceDef {
        key: "construction",
        project_category: Some(CATEGORY_CONSTRUCTION),
        title_id: "Jasa Konstruksi",
        title_en: "Construction Services",
        summary_id: "Pembangunan jalan, jembatan, gedung dan infrastruktur sipil.",
        summary_en: "Roads, bridges, buildings and civil infrastructure works.",
        thumbnail: "/images/services/construction.webp",
    },
    ServiceDef {
        key: "ready-mix-concrete",
        project_category: Some(CATEGORY_BATCHING_PLANT),
        title_id: "Beton Siap Pakai (Batching Plant)",
        title_en: "Ready-Mix Concrete (Batching Plant)",
        summary_id: "Produksi dan pengiriman beton ready-mix berbagai mutu.",
        summary_en: "Production and delivery of ready-mix concrete in every grade.",
        thumbnail: "/images/services/batching-plant.webp",
    },
    ServiceDef {
        key: "hot-mix-asphalt",
        project_category: Some(CATEGORY_ASPHALT_MIXING_PLANT),
        title_id: "Aspal Hotmix (AMP)",
        title_en: "Hot-Mix Asphalt (AMP)",
        summary_id: "Produksi aspal hotmix dari Asphalt Mixing Plant, loco maupun tergelar.",
        summary_en: "Hot-mix asphalt from our Asphalt Mixing Plant, picked up or laid on site.",
        thumbnail: "/images/services/amp.webp",
    },
    ServiceDef {
        key: "equipment-rental",
        project_category: None,
        title_id: "Sewa Alat Berat",
        title_en: "Heavy Equipment Rental",
        summary_id: "Penyewaan excavator, vibro roller, dump truck dan finisher.",
        summary_en: "Excavator, vibratory roller, dump truck and paver rental.",
        thumbnail: "/images/services/equipment.webp",
    },
];

/// A service rendered for one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub key: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub thumbnail: &'static str,
    pub project_category: Option<&'static str>,
    pub url: String,
}

fn render(def: &ServiceDef, locale: Locale) -> Service {
    let (title, summary) = match locale {
        Locale::Id => (def.title_id, def.summary_id),
        Locale::En => (def.title_en, def.summary_en),
    };
    Service {
        key: def.key,
        title,
        summary,
        thumbnail: def.thumbnail,
        project_category: def.project_category,
        url: localized_path(locale, &format!("/services/{}", def.key)),
    }
}

/// Every service, in catalog order.
pub fn catalog(locale: Locale) -> Vec<Service> {
    SERVICES.iter().map(|d| render(d, locale)).collect()
}

/// Services whose title or summary contains `query` (case-insensitive) in
/// either locale; rendered in `locale`.
pub fn search(query: &str, locale: Locale) -> Vec<Service> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    SERVICES
        .iter()
        .filter(|d| {
            [d.title_id, d.title_en, d.summary_id, d.summary_en]
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .map(|d| render(d, locale))
        .collect()
}
