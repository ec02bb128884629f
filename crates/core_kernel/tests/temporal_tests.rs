//! Integration tests for date handling
//!
//! Tests cover month arithmetic as used by the monthly contribution schedule
//! and the wire date format.

use chrono::{Datelike, NaiveDate};
use core_kernel::{add_months, format_date, parse_date, CoreError};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monthly schedule stepped from each previous date
fn schedule(start: NaiveDate, len: usize) -> Vec<NaiveDate> {
    std::iter::successors(Some(start), |d| add_months(*d, 1).ok())
        .take(len)
        .collect()
}

mod month_schedule {
    use super::*;

    #[test]
    fn test_month_end_start_rolls_over_and_keeps_new_day() {
        assert_eq!(
            schedule(date(2022, 1, 31), 4),
            vec![date(2022, 1, 31), date(2022, 3, 3), date(2022, 4, 3), date(2022, 5, 3)]
        );
    }

    #[test]
    fn test_leap_year_rollover() {
        assert_eq!(
            schedule(date(2024, 1, 30), 3),
            vec![date(2024, 1, 30), date(2024, 3, 1), date(2024, 4, 1)]
        );
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(add_months(date(2021, 12, 15), 1).unwrap(), date(2022, 1, 15));
        assert_eq!(add_months(date(2021, 6, 1), 24).unwrap(), date(2023, 6, 1));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            add_months(NaiveDate::MAX, 1),
            Err(CoreError::DateOverflow(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_days_up_to_28_keep_day_of_month(
            offset in 0u64..20_000,
            months in 0u32..240,
        ) {
            let start = date(1990, 1, 1) + chrono::Days::new(offset);
            prop_assume!(start.day() <= 28);
            let next = add_months(start, months).unwrap();
            prop_assert_eq!(next.day(), start.day());
        }

        #[test]
        fn prop_one_month_step_spans_the_start_month(offset in 0u64..20_000) {
            let start = date(1990, 1, 1) + chrono::Days::new(offset);
            let first = start.with_day(1).unwrap();
            let month_len = (first.checked_add_months(chrono::Months::new(1)).unwrap() - first).num_days();

            let next = add_months(start, 1).unwrap();
            prop_assert_eq!((next - start).num_days(), month_len);
        }

        #[test]
        fn prop_format_then_parse(offset in 0u64..40_000) {
            let d = date(1970, 1, 1) + chrono::Days::new(offset);
            prop_assert_eq!(parse_date(&format_date(d)).unwrap(), d);
        }
    }
}
