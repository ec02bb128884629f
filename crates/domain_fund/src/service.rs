//! Fund application services
//!
//! Read-side use cases over a [`NavStore`]: the NAV history query and the gain
//! calculation. Callers pass `today` so results do not depend on the wall
//! clock.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use core_kernel::FundCode;

use crate::error::FundError;
use crate::gain::{simulate, GainReport, GainRequest};
use crate::nav::{NavHistory, NavQuery, NavRecord};
use crate::ports::NavStore;

/// Service for NAV queries and gain calculations
#[derive(Clone)]
pub struct FundService {
    store: Arc<dyn NavStore>,
}

impl FundService {
    pub fn new(store: Arc<dyn NavStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn NavStore> {
        &self.store
    }

    /// Reads a fund's NAV history in ascending date order
    ///
    /// Returns an empty vector when nothing matches.
    pub async fn query_nav_history(&self, query: &NavQuery) -> Result<Vec<NavRecord>, FundError> {
        let mut records = self.store.query_nav(query).await?;
        // adapters promise ascending order; keep it true for any adapter
        if !records.windows(2).all(|w| w[0].info_date <= w[1].info_date) {
            records.sort_by(|a, b| a.info_date.cmp(&b.info_date));
        }
        Ok(records)
    }

    /// Whether the store holds any NAV for the fund
    pub async fn has_fund_data(&self, fund_code: &FundCode) -> Result<bool, FundError> {
        Ok(self.store.has_fund_data(fund_code).await?)
    }

    /// Computes the periodic-investment gain for a validated request
    ///
    /// Loads everything from `request.start` onward (no upper bound) and runs
    /// the monthly simulation against it.
    ///
    /// # Errors
    ///
    /// * `FundError::NoDataFound` - nothing stored from the start date on
    /// * `FundError::NoWorthFound` - a contribution or end date has no NAV
    /// * `FundError::Store` - the store could not be read
    pub async fn compute_gain(&self, request: &GainRequest, today: NaiveDate) -> Result<GainReport, FundError> {
        let query = NavQuery::new(request.fund_code.clone()).since(Some(request.start));
        let records = self.query_nav_history(&query).await?;
        if records.is_empty() {
            return Err(FundError::NoDataFound(request.fund_code.to_string()));
        }

        let history = NavHistory::new(request.fund_code.clone(), records);
        let summary = simulate(&history, request, today)?;

        info!(
            fund_code = %request.fund_code,
            start = %request.start,
            end = %request.end,
            monthly_amount = request.monthly_amount,
            total_invested = summary.total_invested,
            final_market_value = %summary.final_market_value,
            "Gain computed"
        );

        Ok(GainReport { summary, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockNavStore;
    use rust_decimal_macros::dec;

    fn code() -> FundCode {
        FundCode::parse("000962").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_compute_gain_without_data() {
        let service = FundService::new(Arc::new(MockNavStore::new()));
        let request = GainRequest {
            fund_code: code(),
            start: date(2022, 1, 1),
            end: date(2022, 3, 1),
            monthly_amount: 1000,
        };

        let result = service.compute_gain(&request, date(2026, 10, 18)).await;
        assert!(matches!(result, Err(FundError::NoDataFound(c)) if c == "000962"));
    }

    #[tokio::test]
    async fn test_compute_gain_loads_from_start_without_upper_bound() {
        let store = MockNavStore::with_records(vec![
            NavRecord::new(code(), date(2021, 12, 31), dec!(0.9), dec!(0.9), "sina"),
            NavRecord::new(code(), date(2022, 1, 4), dec!(1.0), dec!(1.0), "sina"),
            NavRecord::new(code(), date(2022, 6, 1), dec!(1.5), dec!(1.5), "sina"),
        ])
        .await;
        let service = FundService::new(Arc::new(store.clone()));
        let request = GainRequest {
            fund_code: code(),
            start: date(2022, 1, 1),
            end: date(2022, 1, 4),
            monthly_amount: 100,
        };

        let report = service.compute_gain(&request, date(2026, 10, 18)).await.unwrap();

        assert_eq!(report.history.len(), 2);
        let queries = store.queries().await;
        assert_eq!(queries[0].from, Some(date(2022, 1, 1)));
        assert_eq!(queries[0].to, None);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let store = MockNavStore::new();
        store.set_offline(true).await;
        let service = FundService::new(Arc::new(store));

        let result = service.query_nav_history(&NavQuery::new(code())).await;
        assert!(matches!(result, Err(FundError::Store(e)) if e.is_connection()));
    }
}
