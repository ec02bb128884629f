//! Fund NAV Domain
//!
//! This crate implements the fund side of the NAV tracker: the stored NAV
//! record, the incremental crawl against a remote NAV source, and the
//! periodic-investment (dollar-cost averaging) gain calculation.
//!
//! # Key Concepts
//!
//! - **NAV**: Net Asset Value per unit of a fund on a trading day
//! - **Crawl**: Paging through the remote source and storing new NAV rows
//! - **Gain summary**: Result of investing a fixed amount every month between
//!   two dates
//!
//! # Precision
//!
//! Units bought per contribution are rounded to 4 decimal places, market value
//! to 2, both half away from zero:
//! - Contribution: 1000
//! - NAV: 1.1
//! - Units: 909.0909

pub mod chart;
pub mod crawl;
pub mod error;
pub mod gain;
pub mod nav;
pub mod ports;
pub mod service;

pub use chart::{AxisBounds, NavChart};
pub use crawl::{CrawlConfig, CrawlReport, CrawlStop, CrawlWindow, Crawler};
pub use error::FundError;
pub use gain::{GainReport, GainRequest, GainSummary};
pub use nav::{NavHistory, NavQuery, NavRecord};
pub use ports::{NavPage, NavSource, NavStore, PageRequest, RemoteNav};
pub use service::FundService;

use rust_decimal::Decimal;

use core_kernel::{round_currency, round_units};

/// Calculates units bought with an amount at a NAV
///
/// # Arguments
///
/// * `amount` - The monetary amount to invest
/// * `nav` - The Net Asset Value per unit
///
/// # Returns
///
/// The number of units (rounded to 4 decimal places), zero for a zero NAV
///
/// # Example
///
/// ```rust
/// use domain_fund::calculate_units;
/// use rust_decimal::Decimal;
///
/// let units = calculate_units(Decimal::from(1000), Decimal::new(11, 1));
/// assert_eq!(units, Decimal::new(9090909, 4));
/// ```
pub fn calculate_units(amount: Decimal, nav: Decimal) -> Decimal {
    if nav.is_zero() {
        return Decimal::ZERO;
    }
    round_units(amount / nav)
}

/// Calculates the value of units at a given NAV, in currency precision
pub fn calculate_value(units: Decimal, nav: Decimal) -> Decimal {
    round_currency(units * nav)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_units() {
        assert_eq!(calculate_units(dec!(1000), dec!(1.2)), dec!(833.3333));
        assert_eq!(calculate_units(dec!(1000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_calculate_value() {
        assert_eq!(calculate_value(dec!(2742.4242), dec!(1.2)), dec!(3290.91));
    }
}
