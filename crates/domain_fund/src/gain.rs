//! Periodic-investment (dollar-cost averaging) gain calculation
//!
//! A fixed amount is invested once a month from the start date up to and
//! including the end date. Each contribution buys units at the NAV of its date,
//! or of the next trading day when the market was closed. The position is then
//! valued at the end date's NAV.
//!
//! ```text
//! units += round4(amount / nav(contribution_date))
//! value  = round2(units * nav(end))
//! gain   = value - invested
//! ```

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use core_kernel::{add_months, parse_date, parse_optional_date, FundCode};

use crate::error::FundError;
use crate::nav::{NavHistory, NavRecord};
use crate::{calculate_units, calculate_value};

/// A validated gain calculation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainRequest {
    pub fund_code: FundCode,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Amount invested every month, in whole currency units
    pub monthly_amount: i64,
}

impl GainRequest {
    /// Validates raw request parameters
    ///
    /// `end` defaults to `today` when absent or blank. Checks run in this order:
    /// required parameters, amount, fund code, dates.
    ///
    /// # Errors
    ///
    /// * `FundError::MissingParameter` - code, start or amount is blank
    /// * `FundError::InvalidAmount` - amount is not a positive integer
    /// * `FundError::InvalidFundCode` - code is malformed
    /// * `FundError::InvalidDate` - start or end is not `YYYY-MM-DD`
    pub fn parse(
        code: Option<&str>,
        start: Option<&str>,
        amount: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, FundError> {
        let code = required(code, "code")?;
        let start = required(start, "start")?;
        let amount = required(amount, "amount")?;

        let monthly_amount = parse_amount(amount)?;
        let fund_code = FundCode::parse(code)?;
        let start = parse_date(start)?;
        let end = parse_optional_date(end)?.unwrap_or(today);

        Ok(Self {
            fund_code,
            start,
            end,
            monthly_amount,
        })
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, FundError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FundError::MissingParameter(name)),
    }
}

/// Parses a monthly contribution, which must be a positive whole number
pub fn parse_amount(raw: &str) -> Result<i64, FundError> {
    match raw.trim().parse::<i64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(FundError::InvalidAmount(raw.to_string())),
    }
}

/// Outcome of a gain simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GainSummary {
    pub contributions: u32,
    pub total_invested: i64,
    /// Units held, 4 decimal places
    pub total_units: Decimal,
    /// Market value at the end date, 2 decimal places
    pub final_market_value: Decimal,
    pub gain_or_loss: Decimal,
}

impl fmt::Display for GainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total invested: {}  Total units: {}  Market value: {}  Gain/Loss: {}",
            self.total_invested, self.total_units, self.final_market_value, self.gain_or_loss
        )
    }
}

/// Gain summary plus the NAV series it was computed from
#[derive(Debug, Clone)]
pub struct GainReport {
    pub summary: GainSummary,
    pub history: NavHistory,
}

/// Runs the monthly contribution simulation over a loaded history
///
/// Each contribution date is the previous one plus a calendar month, with
/// days the next month lacks rolling over (Jan 31 -> Mar 3 -> Apr 3). Every
/// date up to and including `end` gets a contribution; the first one always
/// happens.
///
/// # Errors
///
/// Returns `FundError::NoWorthFound` if the end date or any contribution date
/// has no NAV on or after it (up to `today`).
pub fn simulate(
    history: &NavHistory,
    request: &GainRequest,
    today: NaiveDate,
) -> Result<GainSummary, FundError> {
    let amount = Decimal::from(request.monthly_amount);
    let end_nav = history.resolve_on_or_after(request.end, today)?;

    let mut contributions: u32 = 0;
    let mut total_invested: i64 = 0;
    let mut total_units = Decimal::ZERO;
    let mut cursor = request.start;

    loop {
        let nav = history.resolve_on_or_after(cursor, today)?;
        let units = units_for(amount, nav)?;
        debug!(
            contribution_date = %cursor,
            nav_date = %nav.info_date,
            nav = %nav.unit_worth,
            units = %units,
            "Monthly contribution"
        );

        total_invested = total_invested
            .checked_add(request.monthly_amount)
            .ok_or_else(|| FundError::CalculationError("total invested overflow".to_string()))?;
        total_units += units;
        contributions += 1;

        cursor = add_months(cursor, 1)?;
        if cursor > request.end {
            break;
        }
    }

    let final_market_value = calculate_value(total_units, end_nav.unit_worth);

    Ok(GainSummary {
        contributions,
        total_invested,
        total_units,
        final_market_value,
        gain_or_loss: final_market_value - Decimal::from(total_invested),
    })
}

fn units_for(amount: Decimal, nav: &NavRecord) -> Result<Decimal, FundError> {
    if nav.unit_worth <= Decimal::ZERO {
        return Err(FundError::CalculationError(format!(
            "non-positive NAV {} on {}",
            nav.unit_worth, nav.info_date
        )));
    }
    Ok(calculate_units(amount, nav.unit_worth))
}
