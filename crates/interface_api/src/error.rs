//! API error handling
//!
//! The JSON API answers with proper status codes and an [`ErrorResponse`]
//! body. The HTML pages answer every failure with a plain-text message and
//! HTTP 200, which is what the page's users see in the browser.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_fund::FundError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg.clone())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone()),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FundError> for ApiError {
    fn from(err: FundError) -> Self {
        match err {
            e if e.is_input_error() => ApiError::BadRequest(e.to_string()),
            e if e.is_empty_result() => ApiError::NotFound(e.to_string()),
            FundError::Store(e) if e.is_connection() => {
                error!(error = %e, "Data store unreachable");
                ApiError::ServiceUnavailable("data store unreachable".to_string())
            }
            e => {
                error!(error = %e, "Request failed");
                ApiError::Internal(e.to_string())
            }
        }
    }
}

/// Plain-text error for the HTML pages
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PageError(pub String);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.0).into_response()
    }
}

impl From<FundError> for PageError {
    fn from(err: FundError) -> Self {
        match err {
            FundError::MissingParameter(_) => {
                PageError("illegal param, code/start/amount is required".to_string())
            }
            FundError::Store(e) => {
                error!(error = %e, "Data store query failed");
                PageError(format!("data query error: {}", e))
            }
            e => PageError(e.to_string()),
        }
    }
}
