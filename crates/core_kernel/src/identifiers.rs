//! Strongly-typed identifiers for domain entities
//!
//! Fund codes travel through query strings, CLI flags, SQL parameters and the
//! remote source URL, so they are validated once at the boundary and carried
//! as a newtype afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Maximum accepted fund code length (matches the `fund_code` column width)
pub const MAX_FUND_CODE_LEN: usize = 16;

/// A mutual-fund code such as `000962`
///
/// Codes are trimmed and must be non-empty ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FundCode(String);

impl FundCode {
    /// Parses and validates a fund code
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFundCode` if the code is empty, too long, or
    /// contains anything other than ASCII letters and digits.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(CoreError::InvalidFundCode("fund code is empty".to_string()));
        }
        if code.len() > MAX_FUND_CODE_LEN {
            return Err(CoreError::InvalidFundCode(format!(
                "'{}' is longer than {} characters",
                code, MAX_FUND_CODE_LEN
            )));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidFundCode(format!(
                "'{}' must contain only letters and digits",
                code
            )));
        }
        Ok(Self(code.to_string()))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FundCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FundCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for FundCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FundCode::parse(&s).map_err(serde::de::Error::custom)
    }
}
