//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored and serialized as `f64` (model convention), but every
//! arithmetic step goes through `Decimal` so totals and minor-unit amounts
//! are exact. Currency is GBP throughout.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places
pub fn round_money(value: f64) -> f64 {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(DECIMAL_PLACES)
        .to_f64()
        .unwrap_or(0.0)
}

/// Line total: unit price × quantity, rounded to 2 dp
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    let price = Decimal::from_f64(unit_price).unwrap_or(Decimal::ZERO);
    (price * Decimal::from(quantity))
        .round_dp(DECIMAL_PLACES)
        .to_f64()
        .unwrap_or(0.0)
}

/// Amount in minor currency units (pence) for the payment processor
///
/// `5.00 × 2 → 1000`. Uses Decimal so fractional pence never leak through
/// f64 representation error.
pub fn to_minor_units(unit_price: f64, quantity: i32) -> i64 {
    let price = Decimal::from_f64(unit_price).unwrap_or(Decimal::ZERO);
    (price * Decimal::from(quantity) * Decimal::from(100))
        .round()
        .to_i64()
        .unwrap_or(0)
}

/// Convert a minor-unit amount back to pounds
pub fn from_minor_units(minor: i64) -> f64 {
    (Decimal::from(minor) / Decimal::from(100))
        .to_f64()
        .unwrap_or(0.0)
}

/// Format an amount as `£X.XX`
pub fn format_gbp(amount: f64) -> String {
    format!("£{:.2}", round_money(amount))
}

/// Format a minor-unit amount as `£X.XX`
pub fn format_gbp_minor(minor: i64) -> String {
    let amount = Decimal::from(minor) / Decimal::from(100);
    format!("£{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(3.20, 3), 9.60);
        assert_eq!(line_total(0.0, 5), 0.0);
        // 0.1 + 0.2 style representation errors stay out of totals
        assert_eq!(line_total(0.10, 3), 0.30);
    }

    #[test]
    fn test_to_minor_units() {
        // ticket_price=5.00, quantity=2 -> 1000 pence
        assert_eq!(to_minor_units(5.00, 2), 1000);
        assert_eq!(to_minor_units(12.50, 1), 1250);
        assert_eq!(to_minor_units(2.99, 3), 897);
    }

    #[test]
    fn test_from_minor_units() {
        assert_eq!(from_minor_units(1000), 10.0);
        assert_eq!(from_minor_units(897), 8.97);
        assert_eq!(from_minor_units(to_minor_units(5.00, 2)), 10.0);
    }

    #[test]
    fn test_format_gbp() {
        assert_eq!(format_gbp(10.0), "£10.00");
        assert_eq!(format_gbp(7.5), "£7.50");
        assert_eq!(format_gbp_minor(1000), "£10.00");
        assert_eq!(format_gbp_minor(897), "£8.97");
    }
}
