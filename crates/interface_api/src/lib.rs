//! HTTP API Layer
//!
//! This crate serves the fund NAV web view using Axum.
//!
//! # Architecture
//!
//! - **Pages**: `/view/` charts a fund's NAV, `/gain/` charts it annotated with
//!   a periodic-investment gain summary
//! - **JSON API**: the same data under `/api/v1/funds`
//! - **Middleware**: tracing and request logging
//! - **Error Handling**: plain-text page errors, JSON API errors
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let service = FundService::new(Arc::new(PgNavStore::new(pool)));
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod chart;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_fund::FundService;

use crate::config::ApiConfig;
use crate::handlers::{fund, health, pages};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: FundService,
    pub config: ApiConfig,
}

/// Creates the main router
///
/// # Arguments
///
/// * `service` - Fund service over the NAV store
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: FundService, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let page_routes = Router::new()
        .route("/view", get(pages::view_page))
        .route("/view/", get(pages::view_page))
        .route("/gain", get(pages::gain_page))
        .route("/gain/", get(pages::gain_page));

    let fund_routes = Router::new()
        .route("/:code/nav", get(fund::get_nav))
        .route("/:code/gain", get(fund::get_gain));

    let api_routes = Router::new().nest("/funds", fund_routes);

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
