//! Chart payload for NAV line charts
//!
//! Turns an ordered NAV series into what the renderer needs: category labels,
//! values, titles, and a padded Y-axis range.

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{format_date, round_half_up, FundCode};

use crate::nav::{unit_worth_range, NavRecord};

/// Padding added below the minimum and above the maximum NAV
pub const Y_AXIS_PADDING: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Y-axis range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl AxisBounds {
    /// Pads a value range by 0.2 on both sides, rounded to one decimal place
    pub fn padded(min: Decimal, max: Decimal) -> Self {
        Self {
            min: round_half_up(min - Y_AXIS_PADDING, 1),
            max: round_half_up(max + Y_AXIS_PADDING, 1),
        }
    }
}

/// A single-series NAV line chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavChart {
    pub title: String,
    pub subtitle: String,
    pub series_name: String,
    /// Dates as `YYYY-MM-DD`
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
    /// `None` for an empty series
    pub y_axis: Option<AxisBounds>,
}

impl NavChart {
    /// Builds the chart for a fund's series
    ///
    /// `annotation` becomes the subtitle; without one the subtitle is the fund
    /// code.
    pub fn new(fund_code: &FundCode, records: &[NavRecord], annotation: Option<&str>) -> Self {
        let labels = records.iter().map(|r| format_date(r.info_date)).collect();
        let values = records.iter().map(|r| r.unit_worth).collect();
        let y_axis = unit_worth_range(records).map(|(lo, hi)| AxisBounds::padded(lo, hi));

        let subtitle = match annotation {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => fund_code.to_string(),
        };

        Self {
            title: format!("Fund NAV trend ({})", fund_code),
            subtitle,
            series_name: fund_code.to_string(),
            labels,
            values,
            y_axis,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn code() -> FundCode {
        FundCode::parse("000962").unwrap()
    }

    fn nav(day: u32, value: Decimal) -> NavRecord {
        let date = NaiveDate::from_ymd_opt(2022, 4, day).unwrap();
        NavRecord::new(code(), date, value, value, "sina")
    }

    #[test]
    fn test_padding_constant() {
        assert_eq!(Y_AXIS_PADDING, dec!(0.2));
    }

    #[test]
    fn test_axis_bounds_are_padded_and_rounded() {
        let bounds = AxisBounds::padded(dec!(1.234), dec!(1.5678));
        assert_eq!(bounds.min, dec!(1.0));
        assert_eq!(bounds.max, dec!(1.8));
    }

    #[test]
    fn test_chart_from_records() {
        let chart = NavChart::new(
            &code(),
            &[nav(11, dec!(1.234)), nav(12, dec!(1.25)), nav(13, dec!(12.5))],
            None,
        );

        assert_eq!(chart.title, "Fund NAV trend (000962)");
        assert_eq!(chart.subtitle, "000962");
        assert_eq!(chart.labels, vec!["2022-04-11", "2022-04-12", "2022-04-13"]);
        assert_eq!(chart.y_axis, Some(AxisBounds { min: dec!(1.0), max: dec!(12.7) }));
    }

    #[test]
    fn test_annotation_becomes_subtitle() {
        let chart = NavChart::new(&code(), &[nav(11, dec!(1))], Some("Total invested: 1000"));
        assert_eq!(chart.subtitle, "Total invested: 1000");
    }

    #[test]
    fn test_empty_chart_has_no_bounds() {
        let chart = NavChart::new(&code(), &[], None);
        assert!(chart.is_empty());
        assert_eq!(chart.y_axis, None);
    }
}
