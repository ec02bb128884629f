//! Core Kernel - Foundational types and utilities for the fund NAV tracker
//!
//! This crate provides the building blocks shared by every other crate:
//! - Validated fund codes
//! - Calendar-date parsing and month arithmetic
//! - Half-away-from-zero decimal rounding for units and currency
//! - The port error type used at adapter seams

pub mod error;
pub mod identifiers;
pub mod ports;
pub mod rounding;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::FundCode;
pub use ports::PortError;
pub use rounding::{round_currency, round_half_up, round_units, CURRENCY_PRECISION, UNIT_PRECISION};
pub use temporal::{add_months, format_date, parse_date, parse_optional_date, DATE_FORMAT};
