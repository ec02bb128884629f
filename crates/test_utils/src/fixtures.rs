//! Pre-built Test Fixtures
//!
//! Provides ready-to-use NAV data for the scenarios the test suite keeps coming
//! back to. These fixtures are consistent and predictable.

use chrono::{Days, NaiveDate};
use core_kernel::FundCode;
use domain_fund::{NavPage, NavRecord, RemoteNav};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for fund codes
pub struct FundFixtures;

impl FundFixtures {
    /// The fund used across most scenarios
    pub fn code() -> FundCode {
        FundCode::parse("000962").unwrap()
    }

    /// A second fund, for isolation checks
    pub fn other_code() -> FundCode {
        FundCode::parse("110022").unwrap()
    }
}

/// Fixture for NAV records
pub struct NavFixtures;

impl NavFixtures {
    /// Shorthand for a calendar date
    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A record whose unit and total NAV are the same value
    pub fn record(fund_code: &FundCode, date: NaiveDate, unit_worth: Decimal) -> NavRecord {
        NavRecord::new(fund_code.clone(), date, unit_worth, unit_worth, "sina")
    }

    /// NAV 1.0 / 1.1 / 1.2 on the first of Jan, Feb and Mar 2022
    pub fn quarter_2022() -> Vec<NavRecord> {
        let code = FundFixtures::code();
        vec![
            Self::record(&code, Self::date(2022, 1, 1), dec!(1.0)),
            Self::record(&code, Self::date(2022, 2, 1), dec!(1.1)),
            Self::record(&code, Self::date(2022, 3, 1), dec!(1.2)),
        ]
    }

    /// Two records around a market holiday on 2022-04-12
    pub fn holiday_gap() -> Vec<NavRecord> {
        let code = FundFixtures::code();
        vec![
            Self::record(&code, Self::date(2022, 4, 11), dec!(1.234)),
            Self::record(&code, Self::date(2022, 4, 13), dec!(1.250)),
        ]
    }

    /// One record per day starting at `start`, NAV rising by 0.001 a day
    pub fn daily(fund_code: &FundCode, start: NaiveDate, days: u64) -> Vec<NavRecord> {
        (0..days)
            .map(|i| {
                let value = Decimal::ONE + Decimal::new(i as i64, 3);
                Self::record(fund_code, start + Days::new(i), value)
            })
            .collect()
    }
}

/// Fixture for remote source pages
pub struct PageFixtures;

impl PageFixtures {
    /// A remote row as the source sends it, with the time suffix on the date
    pub fn remote(date: NaiveDate, unit_worth: &str) -> RemoteNav {
        RemoteNav {
            info_date: format!("{} 00:00:00", date.format("%Y-%m-%d")),
            unit_worth: unit_worth.to_string(),
            total_worth: unit_worth.to_string(),
        }
    }

    /// A successful page
    pub fn page(records: Vec<RemoteNav>) -> NavPage {
        NavPage {
            status_code: 0,
            total: Some(records.len() as u64),
            records,
        }
    }

    /// A successful page with no rows
    pub fn empty() -> NavPage {
        Self::page(Vec::new())
    }

    /// 50 rows spread over 2020-01-01 ..= 2020-03-10
    pub fn first_crawl_page() -> NavPage {
        let start = NavFixtures::date(2020, 1, 1);
        Self::page(
            (0..50u64)
                .map(|i| Self::remote(start + Days::new(i * 69 / 49), &format!("1.{:04}", i)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_crawl_page_spans_expected_dates() {
        let page = PageFixtures::first_crawl_page();

        assert_eq!(page.records.len(), 50);
        assert_eq!(page.records[0].info_date, "2020-01-01 00:00:00");
        assert_eq!(page.records[49].info_date, "2020-03-10 00:00:00");
    }

    #[test]
    fn test_daily_series() {
        let records = NavFixtures::daily(&FundFixtures::code(), NavFixtures::date(2022, 1, 1), 3);

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].info_date, NavFixtures::date(2022, 1, 3));
        assert_eq!(records[2].unit_worth, dec!(1.002));
    }
}
