//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{shortCode}`
///
/// # Request Flow
///
/// 1. Decode the base62 code into a record id
/// 2. Check the cache (key `url:<id>`)
/// 3. On a miss, read the store and cache the destination for 24 hours
/// 4. Queue a click event for the background worker
/// 5. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or names no URL.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let destination = state.url_service.resolve_redirect(&short_code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, destination)]))
}
