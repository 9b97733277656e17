//! API route configuration.

use crate::api::handlers::{
    create_url_handler, delete_all_urls_handler, delete_url_handler, health_handler,
    list_urls_handler, redirect_handler, user_stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// All application routes, without middleware.
///
/// # Endpoints
///
/// - `POST   /urls`              - Create a short URL
/// - `GET    /urls`              - List a user's URLs (paginated)
/// - `DELETE /urls`              - Delete all URLs of a user
/// - `GET    /urls/stats`        - Click statistics of a user
/// - `DELETE /urls/{id}`         - Delete one URL
/// - `GET    /r/{shortCode}`     - Redirect to the original URL
/// - `GET    /health`            - Health check
pub fn routes() -> Router<AppState> {
    url_routes().merge(public_routes())
}

/// The `/urls` management endpoints.
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/urls",
            get(list_urls_handler)
                .post(create_url_handler)
                .delete(delete_all_urls_handler),
        )
        .route("/urls/stats", get(user_stats_handler))
        .route("/urls/{id}", delete(delete_url_handler))
}

/// Redirects and the health check.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/r/{short_code}", get(redirect_handler))
        .route("/health", get(health_handler))
}
