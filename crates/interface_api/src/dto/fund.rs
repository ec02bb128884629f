//! Fund DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_fund::{GainReport, GainRequest, NavRecord};

/// Query string of `/view/` and the NAV endpoint
#[derive(Debug, Default, Deserialize)]
pub struct NavParams {
    pub code: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Query string of `/gain/` and the gain endpoint
#[derive(Debug, Default, Deserialize)]
pub struct GainParams {
    pub code: Option<String>,
    pub start: Option<String>,
    pub amount: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavPointResponse {
    pub info_date: NaiveDate,
    pub unit_worth: Decimal,
    pub total_worth: Decimal,
}

impl From<&NavRecord> for NavPointResponse {
    fn from(record: &NavRecord) -> Self {
        Self {
            info_date: record.info_date,
            unit_worth: record.unit_worth,
            total_worth: record.total_worth,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavHistoryResponse {
    pub fund_code: String,
    pub count: usize,
    pub records: Vec<NavPointResponse>,
}

impl NavHistoryResponse {
    pub fn new(fund_code: String, records: &[NavRecord]) -> Self {
        Self {
            fund_code,
            count: records.len(),
            records: records.iter().map(NavPointResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GainResponse {
    pub fund_code: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub monthly_amount: i64,
    pub contributions: u32,
    pub total_invested: i64,
    pub total_units: Decimal,
    pub final_market_value: Decimal,
    pub gain_or_loss: Decimal,
}

impl GainResponse {
    pub fn new(request: &GainRequest, report: &GainReport) -> Self {
        let summary = &report.summary;
        Self {
            fund_code: request.fund_code.to_string(),
            start: request.start,
            end: request.end,
            monthly_amount: request.monthly_amount,
            contributions: summary.contributions,
            total_invested: summary.total_invested,
            total_units: summary.total_units,
            final_market_value: summary.final_market_value,
            gain_or_loss: summary.gain_or_loss,
        }
    }
}
