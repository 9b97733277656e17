mod common;

use link_shortener::domain::click_event::ClickEvent;
use link_shortener::domain::click_worker::run_click_worker;
use link_shortener::domain::entities::NewUrl;
use link_shortener::domain::repositories::UrlRepository;
use link_shortener::utils::short_code::encode;
use serde_json::{Value, json};
use std::time::Duration;

#[tokio::test]
async fn test_redirect_success() {
    let mut app = common::spawn_app();

    let created = app
        .server
        .post("/urls")
        .json(&json!({ "originalUrl": "https://example.com/target" }))
        .await
        .json::<Value>();
    let short_url = created["urls"][0]["shortUrl"].as_str().unwrap().to_string();
    let code = short_url.rsplit('/').next().unwrap();

    let response = app.server.get(&format!("/r/{code}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(app.clicks.try_recv().unwrap(), ClickEvent::new(1));
}

#[tokio::test]
async fn test_redirect_cache_miss_reads_store() {
    let mut app = common::spawn_app();

    // Inserted behind the service's back, so nothing is cached yet.
    let record = app
        .repository
        .create(NewUrl::new("https://example.com/direct".to_string(), None))
        .await
        .unwrap();
    let key = format!("url:{}", record.id);
    assert!(!app.state.cache().has(&key));

    let response = app.server.get(&format!("/r/{}", encode(record.code_id()))).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/direct");
    assert!(app.state.cache().has(&key));
    assert!(app.clicks.try_recv().is_ok());
}

#[tokio::test]
async fn test_redirect_served_from_cache_after_store_delete() {
    let app = common::spawn_app();

    app.server
        .post("/urls")
        .json(&json!({ "originalUrl": "https://example.com/cached" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // Removing the row directly leaves the cache entry in place.
    assert!(app.repository.delete(1).await.unwrap());

    let response = app.server.get(&format!("/r/{}", encode(1))).await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/cached");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::spawn_app();

    app.server.get("/r/B9").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_invalid_code_is_not_found() {
    let mut app = common::spawn_app();

    let response = app.server.get("/r/A!B").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert!(app.clicks.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_clicks_reach_store_through_worker() {
    let (state, repository, rx) = common::create_test_state(common::settings());
    let worker = tokio::spawn(run_click_worker(rx, repository.clone()));
    let server =
        axum_test::TestServer::new(link_shortener::api::routes::routes().with_state(state)).unwrap();

    server
        .post("/urls")
        .json(&json!({ "originalUrl": "https://example.com/counted", "userId": "u1" }))
        .await;

    for _ in 0..3 {
        assert_eq!(server.get(&format!("/r/{}", encode(1))).await.status_code(), 302);
    }

    let mut clicks = 0;
    for _ in 0..50 {
        clicks = repository.find_by_id(1).await.unwrap().unwrap().clicks;
        if clicks == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(clicks, 3);

    let stats = server
        .get("/urls/stats")
        .add_query_param("userId", "u1")
        .await
        .json::<Value>();
    assert_eq!(stats["totalClicks"], 3);

    worker.abort();
}
