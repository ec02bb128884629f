//! Fund domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors that can occur in the fund domain
#[derive(Debug, Error)]
pub enum FundError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid amount '{0}': must be a positive whole number")]
    InvalidAmount(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid fund code: {0}")]
    InvalidFundCode(String),

    #[error("No NAV data found for fund {0}")]
    NoDataFound(String),

    #[error("No NAV found on or after {0}")]
    NoWorthFound(NaiveDate),

    #[error("Invalid NAV data: {0}")]
    InvalidData(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Data store error: {0}")]
    Store(#[from] PortError),
}

impl FundError {
    /// Returns true for errors caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FundError::MissingParameter(_)
                | FundError::InvalidAmount(_)
                | FundError::InvalidDate(_)
                | FundError::InvalidFundCode(_)
        )
    }

    /// Returns true for well-formed requests that matched nothing
    pub fn is_empty_result(&self) -> bool {
        matches!(self, FundError::NoDataFound(_) | FundError::NoWorthFound(_))
    }
}

impl From<CoreError> for FundError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidFundCode(msg) => FundError::InvalidFundCode(msg),
            CoreError::InvalidDate { value } => FundError::InvalidDate(value),
            other => FundError::CalculationError(other.to_string()),
        }
    }
}
