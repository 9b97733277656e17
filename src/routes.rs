//! Top-level router configuration.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the `/urls` endpoints
//!   (configurable for proxy deployments); redirects and health are not limited
//! - **Path normalization** - Trailing slash handling
//!
//! See [`crate::api::routes::routes`] for the endpoint list.

use crate::api;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, behind_proxy))
}

/// Routes with tracing and rate limiting, before path normalization.
pub fn api_router(state: AppState, behind_proxy: bool) -> Router {
    rate_limit::apply(api::routes::url_routes(), behind_proxy)
        .merge(api::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}
