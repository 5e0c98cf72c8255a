//! 金额计算 - Decimal 精度
//!
//! Amounts travel as JSON numbers (`f64`) but every comparison is done in
//! `Decimal` space rounded to cents, so `6.98 == 6.49 + 0.49` holds where the
//! raw float sum would not.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// f64 → Decimal, rounded to cents
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(2)
}

/// Decimal → f64 (display/serialization boundary only)
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `total == subtotal + shipping`, compared in cents
pub fn totals_balance(subtotal: f64, shipping_cost: f64, total_amount: f64) -> bool {
    to_decimal(subtotal) + to_decimal(shipping_cost) == to_decimal(total_amount)
}

/// Amounts are compared in cents, not bits
pub fn amounts_equal(a: f64, b: f64) -> bool {
    to_decimal(a) == to_decimal(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_float_drift_is_absorbed() {
        // 0.1 + 0.2 != 0.3 in f64, but balances in Decimal space
        assert!(totals_balance(0.1, 0.2, 0.3));
    }

    #[test]
    fn unbalanced_totals_are_detected() {
        assert!(!totals_balance(6.98, 0.0, 7.00));
        assert!(!totals_balance(25.98, 5.99, 25.98));
    }

    #[test]
    fn zero_shipping_balances() {
        assert!(totals_balance(6.98, 0.0, 6.98));
    }

    #[test]
    fn amounts_compare_in_cents() {
        assert!(amounts_equal(25.98, 25.98));
        assert!(amounts_equal(25.980_000_001, 25.98));
        assert!(!amounts_equal(25.98, 25.99));
    }
}
