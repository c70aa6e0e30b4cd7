//! Asphalt and ready-mix concrete price calculators.
//!
//! A quote is a pure function of the selected price entry, the quantity,
//! the asphalt variant and the PPN toggle:
//!
//! ```text
//! subtotal = unit_price * quantity
//! tax      = include_tax ? round(subtotal * PPN_RATE) : 0
//! total    = subtotal + tax
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::currency::format_rupiah_f64;
use crate::error::CoreError;
use crate::types::Rupiah;

/// Indonesian value-added tax rate.
pub const PPN_RATE: f64 = 0.11;

/// Asphalt price variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsphaltVariant {
    /// Picked up at the plant.
    #[default]
    Loco,
    /// Delivered and laid on site.
    Tergelar,
}

impl AsphaltVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            AsphaltVariant::Loco => "loco",
            AsphaltVariant::Tergelar => "tergelar",
        }
    }
}

impl FromStr for AsphaltVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loco" => Ok(AsphaltVariant::Loco),
            "tergelar" => Ok(AsphaltVariant::Tergelar),
            other => Err(CoreError::Validation(format!(
                "Unknown asphalt variant '{other}'. Must be one of: loco, tergelar"
            ))),
        }
    }
}

/// A price-list entry a calculator can quote against.
///
/// Concrete entries carry a single price and ignore the variant.
pub trait PricedItem {
    fn unit_price(&self, variant: AsphaltVariant) -> Rupiah;
}

/// Coerce raw form input into a quantity.
///
/// Empty, non-numeric, non-finite and negative input all yield `0.0`.
/// A lone decimal comma (`"2,5"`) is accepted.
pub fn parse_quantity(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };
    normalized.parse::<f64>().map(sanitize_quantity).unwrap_or(0.0)
}

/// Clamp a numeric quantity to a finite, non-negative value.
pub fn sanitize_quantity(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        0.0
    }
}

/// Formatted rendering of a [`Quote`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedQuote {
    pub unit_price: String,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

/// Result of a calculator run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub unit_price: Rupiah,
    pub quantity: f64,
    pub include_tax: bool,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub formatted: FormattedQuote,
}

impl Quote {
    /// Compute a quote. The quantity is sanitized first.
    pub fn compute(unit_price: Rupiah, quantity: f64, include_tax: bool) -> Self {
        let quantity = sanitize_quantity(quantity);
        let subtotal = unit_price as f64 * quantity;
        let tax = if include_tax {
            (subtotal * PPN_RATE).round()
        } else {
            0.0
        };
        let total = subtotal + tax;

        Self {
            unit_price,
            quantity,
            include_tax,
            subtotal,
            tax,
            total,
            formatted: FormattedQuote {
                unit_price: format_rupiah_f64(unit_price as f64),
                subtotal: format_rupiah_f64(subtotal),
                tax: format_rupiah_f64(tax),
                total: format_rupiah_f64(total),
            },
        }
    }
}

/// Quote an asphalt price entry.
pub fn quote_asphalt(
    price_loco: Rupiah,
    price_tergelar: Rupiah,
    variant: AsphaltVariant,
    quantity: f64,
    include_tax: bool,
) -> Quote {
    let unit_price = match variant {
        AsphaltVariant::Tergelar => price_tergelar,
        AsphaltVariant::Loco => price_loco,
    };
    Quote::compute(unit_price, quantity, include_tax)
}

/// Quote a ready-mix concrete price entry.
pub fn quote_concrete(price: Rupiah, quantity: f64, include_tax: bool) -> Quote {
    Quote::compute(price, quantity, include_tax)
}

/// Quote any [`PricedItem`].
pub fn quote_item<P: PricedItem>(
    item: &P,
    variant: AsphaltVariant,
    quantity: f64,
    include_tax: bool,
) -> Quote {
    Quote::compute(item.unit_price(variant), quantity, include_tax)
}

/// Initial calculator state for a price list: the first entry, quantity 0,
/// tax off. An empty list renders no calculator.
pub fn initial_quote<P: PricedItem>(entries: &[P]) -> Option<Quote> {
    entries
        .first()
        .map(|first| quote_item(first, AsphaltVariant::default(), 0.0, false))
}
