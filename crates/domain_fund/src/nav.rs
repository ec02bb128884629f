//! Net Asset Value (NAV) records and history
//!
//! This module holds the stored NAV record, the date-bounded query used to
//! read it back, and a date-indexed history used by the gain calculator.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::FundCode;

use crate::error::FundError;

/// A single NAV price point for a fund
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavRecord {
    /// Store-assigned identifier, `None` before insert
    pub id: Option<i64>,
    /// Fund code
    pub fund_code: FundCode,
    /// Date of the NAV
    pub info_date: NaiveDate,
    /// NAV value per unit
    pub unit_worth: Decimal,
    /// Cumulative NAV (unit NAV plus distributions paid)
    pub total_worth: Decimal,
    /// Provenance tag
    pub source: String,
}

impl NavRecord {
    /// Creates a new, not yet stored NAV record
    ///
    /// # Arguments
    ///
    /// * `fund_code` - The fund this NAV is for
    /// * `info_date` - The valuation date
    /// * `unit_worth` - The NAV per unit
    /// * `total_worth` - The cumulative NAV
    pub fn new(
        fund_code: FundCode,
        info_date: NaiveDate,
        unit_worth: Decimal,
        total_worth: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            fund_code,
            info_date,
            unit_worth,
            total_worth,
            source: source.into(),
        }
    }

    /// Sets the store identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// A date-bounded read of one fund's NAV history
///
/// Both bounds are inclusive and optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavQuery {
    pub fund_code: FundCode,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl NavQuery {
    /// Creates an unbounded query for a fund
    pub fn new(fund_code: FundCode) -> Self {
        Self {
            fund_code,
            from: None,
            to: None,
        }
    }

    /// Sets the inclusive lower bound
    pub fn since(mut self, from: Option<NaiveDate>) -> Self {
        self.from = from;
        self
    }

    /// Sets the inclusive upper bound
    pub fn until(mut self, to: Option<NaiveDate>) -> Self {
        self.to = to;
        self
    }

    /// Checks whether a date falls inside the bounds
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// NAV history indexed by date
///
/// Records are kept in ascending date order; the index gives O(1) lookup of
/// the record for an exact date.
#[derive(Debug, Clone)]
pub struct NavHistory {
    fund_code: FundCode,
    records: Vec<NavRecord>,
    by_date: HashMap<NaiveDate, usize>,
}

impl NavHistory {
    /// Builds a history from records in any order
    ///
    /// When two records share a date the later one in the input wins.
    pub fn new(fund_code: FundCode, mut records: Vec<NavRecord>) -> Self {
        records.sort_by(|a, b| a.info_date.cmp(&b.info_date));
        let by_date = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.info_date, idx))
            .collect();
        Self {
            fund_code,
            records,
            by_date,
        }
    }

    pub fn fund_code(&self) -> &FundCode {
        &self.fund_code
    }

    /// Records in ascending date order
    pub fn records(&self) -> &[NavRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gets the latest NAV
    pub fn latest(&self) -> Option<&NavRecord> {
        self.records.last()
    }

    /// Gets the NAV for an exact date
    pub fn at_date(&self, date: NaiveDate) -> Option<&NavRecord> {
        self.by_date.get(&date).map(|&idx| &self.records[idx])
    }

    /// Resolves the NAV used for a trade on `date`
    ///
    /// Returns the record for `date` itself, or for the first following day
    /// that has one (markets are closed on weekends and holidays). The scan
    /// gives up once it moves past `today`.
    ///
    /// # Errors
    ///
    /// Returns `FundError::NoWorthFound` if no record exists between `date`
    /// and `today`.
    pub fn resolve_on_or_after(
        &self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<&NavRecord, FundError> {
        let mut cursor = date;
        loop {
            if let Some(record) = self.at_date(cursor) {
                return Ok(record);
            }
            cursor = match cursor.succ_opt() {
                Some(next) if next <= today => next,
                _ => return Err(FundError::NoWorthFound(date)),
            };
        }
    }
}

/// Lowest and highest unit NAV in a series, `None` when it is empty
pub fn unit_worth_range(records: &[NavRecord]) -> Option<(Decimal, Decimal)> {
    let mut values = records.iter().map(|r| r.unit_worth);
    let first = values.next()?;
    Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}
