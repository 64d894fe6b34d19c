//! Monetary helpers.
//!
//! Amounts are `rust_decimal::Decimal` throughout the domain so per-line and
//! aggregate sums stay exact. Rounding happens only at the boundary where an
//! amount is displayed or persisted, via [`round_display`].

use rust_decimal::{Decimal, RoundingStrategy};

/// Display precision for monetary amounts (2 decimal places).
pub const DISPLAY_SCALE: u32 = 2;

/// Round an exact amount to display precision.
///
/// Half-way cases round away from zero (commercial rounding).
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_display(dec!(10.005)), dec!(10.01));
        assert_eq!(round_display(dec!(10.004)), dec!(10.00));
        assert_eq!(round_display(dec!(360)), dec!(360));
    }

    #[test]
    fn exact_sums_do_not_drift() {
        // 0.1 + 0.2 is exact in decimal arithmetic.
        let sum = dec!(0.1) + dec!(0.2);
        assert_eq!(sum, dec!(0.3));
        assert_eq!(round_display(sum), dec!(0.30));
    }
}
