//! Concrete and asphalt price list models and DTOs.

use pondasi_core::pricing::{AsphaltVariant, PricedItem};
use pondasi_core::types::{DbId, Rupiah, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Ready-mix concrete price per unit (usually m3).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConcretePrice {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub price: Rupiah,
    pub unit: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PricedItem for ConcretePrice {
    fn unit_price(&self, _variant: AsphaltVariant) -> Rupiah {
        self.price
    }
}

/// Hot-mix asphalt price: `loco` is picked up at the plant, `tergelar` is
/// laid on site.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AsphaltPrice {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub price_loco: Rupiah,
    pub price_tergelar: Rupiah,
    pub unit: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PricedItem for AsphaltPrice {
    fn unit_price(&self, variant: AsphaltVariant) -> Rupiah {
        match variant {
            AsphaltVariant::Loco => self.price_loco,
            AsphaltVariant::Tergelar => self.price_tergelar,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConcretePrice {
    #[validate(length(min = 1, max = 50, message = "Code is required (max 50 characters)"))]
    pub code: String,
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: Rupiah,
    #[validate(length(min = 1, max = 20, message = "Unit must be 1-20 characters"))]
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateConcretePrice {
    #[validate(length(min = 1, max = 50, message = "Code is required (max 50 characters)"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: Option<Rupiah>,
    #[validate(length(min = 1, max = 20, message = "Unit must be 1-20 characters"))]
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAsphaltPrice {
    #[validate(length(min = 1, max = 50, message = "Code is required (max 50 characters)"))]
    pub code: String,
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_loco: Rupiah,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_tergelar: Rupiah,
    #[validate(length(min = 1, max = 20, message = "Unit must be 1-20 characters"))]
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAsphaltPrice {
    #[validate(length(min = 1, max = 50, message = "Code is required (max 50 characters)"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_loco: Option<Rupiah>,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_tergelar: Option<Rupiah>,
    #[validate(length(min = 1, max = 20, message = "Unit must be 1-20 characters"))]
    pub unit: Option<String>,
    pub description: Option<String>,
}
