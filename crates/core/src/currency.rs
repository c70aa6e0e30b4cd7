//! Indonesian Rupiah formatting.
//!
//! Amounts are shown with zero decimals and `.` as the thousands separator,
//! e.g. `Rp 2.775.000`.

use crate::types::Rupiah;

pub const CURRENCY_PREFIX: &str = "Rp";

/// Format a whole-rupiah amount.
pub fn format_rupiah(amount: Rupiah) -> String {
    let digits = group_thousands(amount.unsigned_abs());
    if amount < 0 {
        format!("-{CURRENCY_PREFIX} {digits}")
    } else {
        format!("{CURRENCY_PREFIX} {digits}")
    }
}

/// Format a computed amount, rounding half away from zero to whole rupiah.
///
/// Non-finite input formats as zero.
pub fn format_rupiah_f64(amount: f64) -> String {
    if !amount.is_finite() {
        return format_rupiah(0);
    }
    format_rupiah(amount.round() as Rupiah)
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
