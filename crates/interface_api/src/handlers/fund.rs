//! Fund JSON handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;

use core_kernel::{parse_optional_date, FundCode};
use domain_fund::{FundError, GainRequest, NavQuery};

use crate::dto::fund::{GainParams, GainResponse, NavHistoryResponse, NavParams};
use crate::{error::ApiError, AppState};

/// Gets the NAV history of a fund, optionally bounded by `from` / `to`
pub async fn get_nav(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<NavParams>,
) -> Result<Json<NavHistoryResponse>, ApiError> {
    let fund_code = FundCode::parse(&code).map_err(FundError::from)?;
    let from = parse_optional_date(params.from.as_deref()).map_err(FundError::from)?;
    let to = parse_optional_date(params.to.as_deref()).map_err(FundError::from)?;

    let query = NavQuery::new(fund_code.clone()).since(from).until(to);
    let records = state.service.query_nav_history(&query).await?;

    Ok(Json(NavHistoryResponse::new(fund_code.to_string(), &records)))
}

/// Computes the periodic-investment gain of a fund
pub async fn get_gain(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<GainParams>,
) -> Result<Json<GainResponse>, ApiError> {
    let today = Local::now().date_naive();
    let request = GainRequest::parse(
        Some(code.as_str()),
        params.start.as_deref(),
        params.amount.as_deref(),
        params.end.as_deref(),
        today,
    )?;

    let report = state.service.compute_gain(&request, today).await?;
    Ok(Json(GainResponse::new(&request, &report)))
}
