mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use link_shortener::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _repo, _rx) = common::create_test_state(common::settings());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let (state, _repo, rx) = common::create_test_state(common::settings());
    drop(rx);

    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
}
