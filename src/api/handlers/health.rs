//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Store round trip
/// 2. **Click Queue**: Checks if channel is open and reports free slots
/// 3. **Cache**: Reports the number of held entries
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let queue_check = check_click_queue(&state);
    let cache_check = check_cache(&state);

    let all_healthy = db_check.is_ok() && queue_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            click_queue: queue_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.url_service.check_store().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

fn check_click_queue(state: &AppState) -> CheckStatus {
    let sender = state.url_service.click_sender();
    if sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", sender.capacity()))
    }
}

/// The in-process cache cannot be unreachable; this reports its size.
fn check_cache(state: &AppState) -> CheckStatus {
    CheckStatus::ok(format!("In-memory, {} entries", state.cache().len()))
}
