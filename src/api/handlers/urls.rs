//! Handlers for the `/urls` endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use validator::Validate;

use crate::api::dto::urls::{
    CreateUrlRequest, DeleteUrlQuery, ListUrlsQuery, MessageResponse, UrlListResponse, UserQuery,
};
use crate::domain::entities::UserStats;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/long/path", "userId": "42" }
/// ```
///
/// `userId` is optional. Without it the URL is owned by the guest user and
/// the response lists only the new URL; with it the response carries the
/// user's refreshed first page (limit 5).
///
/// # Errors
///
/// - 400 if the body fails validation
/// - 403 if the user already owns the maximum number of URLs
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlListResponse>), AppError> {
    payload.validate()?;

    let owner = payload.owner();
    let created = state
        .url_service
        .create_url(payload.original_url, owner)
        .await?;

    const MESSAGE: &str = "URL created successfully";
    let body = match created.listing {
        Some(page) => UrlListResponse::new(Some(MESSAGE), Arc::new(page)),
        None => UrlListResponse::single(MESSAGE, created.url),
    };

    Ok((StatusCode::CREATED, Json(body)))
}

/// Lists a user's URLs, newest first.
///
/// # Endpoint
///
/// `GET /urls?userId=42&page=1&limit=5`
///
/// `page` past the last page is clamped; the served page is reported in
/// `pagination.page`.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Query(query): Query<ListUrlsQuery>,
) -> Result<Json<UrlListResponse>, AppError> {
    query.validate()?;

    let page = state
        .url_service
        .list_user_urls(query.user_id(), query.page, query.limit)
        .await?;

    Ok(Json(UrlListResponse::new(None, page)))
}

/// Returns click totals and the five most clicked URLs of a user.
///
/// # Endpoint
///
/// `GET /urls/stats?userId=42`
pub async fn user_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Arc<UserStats>>, AppError> {
    query.validate()?;

    let stats = state.url_service.user_stats(query.user_id()).await?;

    Ok(Json(stats))
}

/// Deletes one URL.
///
/// # Endpoint
///
/// `DELETE /urls/{id}?userId=42&page=1&limit=5`
///
/// # Errors
///
/// - 404 if the URL does not exist
/// - 403 if `userId` is given and does not own the URL
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteUrlQuery>,
) -> Result<Json<UrlListResponse>, AppError> {
    query.validate()?;

    const MESSAGE: &str = "URL deleted successfully";
    let listing = state
        .url_service
        .delete_url(id, query.user_id.as_deref(), query.page, query.limit)
        .await?;

    let body = match listing {
        Some(page) => UrlListResponse::new(Some(MESSAGE), page),
        None => UrlListResponse::message_only(MESSAGE),
    };

    Ok(Json(body))
}

/// Deletes every URL of a user.
///
/// # Endpoint
///
/// `DELETE /urls?userId=42`
pub async fn delete_all_urls_handler(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    query.validate()?;

    let deleted = state
        .url_service
        .delete_all_user_urls(query.user_id())
        .await?;

    Ok(Json(MessageResponse {
        message: "All URLs deleted successfully",
        deleted: Some(deleted),
    }))
}
