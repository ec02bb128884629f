//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating NAV data that maintains domain
//! invariants.

use chrono::{Days, NaiveDate};
use core_kernel::FundCode;
use domain_fund::NavRecord;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid fund codes (six digits)
pub fn fund_code_strategy() -> impl Strategy<Value = FundCode> {
    "[0-9]{6}".prop_map(|s| FundCode::parse(&s).unwrap())
}

/// Strategy for generating valid NAV values (0.1000 to 10.0000)
pub fn nav_strategy() -> impl Strategy<Value = Decimal> {
    (1_000i64..100_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for generating valid monthly amounts
pub fn monthly_amount_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

/// Strategy for generating dates between 2010 and roughly 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..7300u64).prop_map(|offset| NaiveDate::from_ymd_opt(2010, 1, 1).unwrap() + Days::new(offset))
}

/// Strategy for generating a NAV series for one fund in random order
///
/// Dates are unique, so every record maps to its own store row.
pub fn shuffled_series_strategy(fund_code: FundCode) -> impl Strategy<Value = Vec<NavRecord>> {
    proptest::collection::btree_map(date_strategy(), nav_strategy(), 1..80)
        .prop_map(move |points| {
            points
                .into_iter()
                .map(|(date, nav)| NavRecord::new(fund_code.clone(), date, nav, nav, "sina"))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_nav_strategy_is_positive(nav in nav_strategy()) {
            prop_assert!(nav > Decimal::ZERO);
            prop_assert!(nav.scale() <= 4);
        }

        #[test]
        fn test_series_dates_are_unique(series in shuffled_series_strategy(FundCode::parse("000962").unwrap())) {
            let mut dates: Vec<NaiveDate> = series.iter().map(|r| r.info_date).collect();
            dates.sort();
            dates.dedup();
            prop_assert_eq!(dates.len(), series.len());
        }
    }
}
