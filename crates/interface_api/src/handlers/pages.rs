//! HTML page handlers
//!
//! Both pages render a NAV line chart. Failures come back as plain text with
//! HTTP 200 (see [`PageError`]).

use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Local;
use tracing::debug;

use core_kernel::{parse_optional_date, FundCode};
use domain_fund::{FundError, GainRequest, NavChart, NavQuery};

use crate::chart::render_page;
use crate::dto::fund::{GainParams, NavParams};
use crate::error::PageError;
use crate::AppState;

/// `GET /view/?code=&from=&to=`
pub async fn view_page(
    State(state): State<AppState>,
    Query(params): Query<NavParams>,
) -> Result<Html<String>, PageError> {
    let code = match params.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => {
            return Err(PageError(
                "param is illegal, please ensure parameter [code] is specified".to_string(),
            ))
        }
    };
    let fund_code = FundCode::parse(code).map_err(FundError::from)?;
    let from = parse_optional_date(params.from.as_deref()).map_err(FundError::from)?;
    let to = parse_optional_date(params.to.as_deref()).map_err(FundError::from)?;

    if !state.service.has_fund_data(&fund_code).await? {
        return Err(PageError(format!(
            "no NAV data stored for fund {0}, run `fund-crawl -c {0}` first",
            fund_code
        )));
    }

    let query = NavQuery::new(fund_code.clone()).since(from).until(to);
    let records = state.service.query_nav_history(&query).await?;
    debug!(fund_code = %fund_code, count = records.len(), "Rendering NAV chart");

    Ok(Html(render_page(&NavChart::new(&fund_code, &records, None))))
}

/// `GET /gain/?code=&start=&amount=&end=`
pub async fn gain_page(
    State(state): State<AppState>,
    Query(params): Query<GainParams>,
) -> Result<Html<String>, PageError> {
    let today = Local::now().date_naive();
    let request = GainRequest::parse(
        params.code.as_deref(),
        params.start.as_deref(),
        params.amount.as_deref(),
        params.end.as_deref(),
        today,
    )?;

    let report = state.service.compute_gain(&request, today).await?;
    let annotation = report.summary.to_string();

    Ok(Html(render_page(&NavChart::new(
        &request.fund_code,
        report.history.records(),
        Some(&annotation),
    ))))
}
