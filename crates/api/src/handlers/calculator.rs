//! Handlers for the stateless price calculators.

use axum::extract::State;
use axum::Json;
use pondasi_core::pricing::{parse_quantity, quote_item, sanitize_quantity, AsphaltVariant, Quote};
use pondasi_core::types::DbId;
use pondasi_db::models::price::{AsphaltPrice, ConcretePrice};
use pondasi_db::repositories::{AsphaltPriceRepo, ConcretePriceRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Quantity as typed into the form: a JSON number or the raw input string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(f64),
    Text(String),
}

impl QuantityInput {
    /// Non-numeric, negative and missing input all count as zero.
    pub fn value(&self) -> f64 {
        match self {
            QuantityInput::Number(n) => sanitize_quantity(*n),
            QuantityInput::Text(s) => parse_quantity(s),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CalculatorRequest {
    pub price_id: DbId,
    pub quantity: Option<QuantityInput>,
    /// Asphalt only: `loco` (default) or `tergelar`.
    pub variant: Option<String>,
    #[serde(default)]
    pub include_tax: bool,
}

impl CalculatorRequest {
    fn quantity(&self) -> f64 {
        self.quantity.as_ref().map_or(0.0, QuantityInput::value)
    }
}

#[derive(Debug, Serialize)]
pub struct CalculatorResponse<P: Serialize> {
    pub price: P,
    pub variant: Option<AsphaltVariant>,
    pub quote: Quote,
}

/// POST /api/v1/calculator/asphalt
pub async fn asphalt(
    State(state): State<AppState>,
    Json(input): Json<CalculatorRequest>,
) -> AppResult<Json<DataResponse<CalculatorResponse<AsphaltPrice>>>> {
    let variant = match input.variant.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<AsphaltVariant>()?,
        _ => AsphaltVariant::default(),
    };

    let price = AsphaltPriceRepo::find_by_id(&state.pool, input.price_id)
        .await?
        .ok_or_else(|| price_not_found("AsphaltPrice", input.price_id))?;

    let quote = quote_item(&price, variant, input.quantity(), input.include_tax);
    Ok(Json(DataResponse {
        data: CalculatorResponse {
            price,
            variant: Some(variant),
            quote,
        },
    }))
}

/// POST /api/v1/calculator/concrete
pub async fn concrete(
    State(state): State<AppState>,
    Json(input): Json<CalculatorRequest>,
) -> AppResult<Json<DataResponse<CalculatorResponse<ConcretePrice>>>> {
    let price = ConcretePriceRepo::find_by_id(&state.pool, input.price_id)
        .await?
        .ok_or_else(|| price_not_found("ConcretePrice", input.price_id))?;

    let quote = quote_item(
        &price,
        AsphaltVariant::default(),
        input.quantity(),
        input.include_tax,
    );
    Ok(Json(DataResponse {
        data: CalculatorResponse {
            price,
            variant: None,
            quote,
        },
    }))
}

fn price_not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(pondasi_core::error::CoreError::NotFound { entity, id })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CalculatorRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn quantity_accepts_numbers_and_strings() {
        assert_eq!(request(r#"{"price_id":1,"quantity":2.5}"#).quantity(), 2.5);
        assert_eq!(request(r#"{"price_id":1,"quantity":"2,5"}"#).quantity(), 2.5);
        assert_eq!(request(r#"{"price_id":1,"quantity":"abc"}"#).quantity(), 0.0);
        assert_eq!(request(r#"{"price_id":1,"quantity":-4}"#).quantity(), 0.0);
        assert_eq!(request(r#"{"price_id":1}"#).quantity(), 0.0);
    }

    #[test]
    fn include_tax_defaults_off() {
        assert!(!request(r#"{"price_id":1}"#).include_tax);
    }
}
