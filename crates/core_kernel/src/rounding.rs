//! Decimal rounding rules
//!
//! Units are held to 4 decimal places and currency to 2. Both round half away
//! from zero (0.00005 -> 0.0001), not the banker's rounding that
//! `Decimal::round_dp` applies.

use rust_decimal::{Decimal, RoundingStrategy};

/// Unit precision (4 decimal places)
pub const UNIT_PRECISION: u32 = 4;

/// Currency precision (2 decimal places)
pub const CURRENCY_PRECISION: u32 = 2;

/// Rounds to `dp` decimal places, half away from zero
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a unit count to standard unit precision
pub fn round_units(value: Decimal) -> Decimal {
    round_half_up(value, UNIT_PRECISION)
}

/// Rounds a monetary value to currency precision
pub fn round_currency(value: Decimal) -> Decimal {
    round_half_up(value, CURRENCY_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_units() {
        assert_eq!(round_units(dec!(1000) / dec!(1.1)), dec!(909.0909));
        assert_eq!(round_units(dec!(1000) / dec!(1.2)), dec!(833.3333));
        assert_eq!(round_units(dec!(1000) / dec!(0.9)), dec!(1111.1111));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_units(dec!(0.00005)), dec!(0.0001));
        assert_eq!(round_currency(dec!(2.125)), dec!(2.13));
        assert_eq!(round_currency(dec!(-2.125)), dec!(-2.13));
        assert_eq!(round_half_up(dec!(0.25), 1), dec!(0.3));
    }

    proptest! {
        #[test]
        fn prop_round_units_is_within_half_a_step(mantissa in -1_000_000_000i64..1_000_000_000i64) {
            let value = Decimal::new(mantissa, 7);
            let rounded = round_units(value);
            prop_assert!(rounded.scale() <= UNIT_PRECISION);
            prop_assert!((rounded - value).abs() <= dec!(0.00005));
        }
    }
}
