//! Domain logic for the Pondasi construction company website.
//!
//! Pure functions and headless state models with no database or HTTP
//! dependencies: price calculators, rupiah formatting, organization-tree
//! construction, slug and content validation, locale handling, search
//! helpers, layout chrome state, and upload image conversion.

pub mod article;
pub mod carousel;
pub mod chrome;
pub mod currency;
pub mod error;
pub mod i18n;
pub mod imaging;
pub mod locale;
pub mod ordering;
pub mod org_tree;
pub mod pricing;
pub mod project;
pub mod roles;
pub mod search;
pub mod search_overlay;
pub mod services;
pub mod slug;
pub mod types;
