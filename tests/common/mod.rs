#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use tokio::sync::mpsc;
use link_shortener::api::routes::routes;
use link_shortener::application::services::{UrlService, UrlServiceSettings};
use link_shortener::domain::click_event::ClickEvent;
use link_shortener::domain::repositories::UrlRepository;
use link_shortener::infrastructure::cache::AppCache;
use link_shortener::infrastructure::persistence::InMemoryUrlRepository;
use link_shortener::state::AppState;

pub const TEST_DOMAIN: &str = "https://sho.rt";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub repository: Arc<InMemoryUrlRepository>,
    pub clicks: mpsc::Receiver<ClickEvent>,
}

pub fn settings() -> UrlServiceSettings {
    UrlServiceSettings {
        short_domain: Some(TEST_DOMAIN.to_string()),
        ..UrlServiceSettings::default()
    }
}

pub fn create_test_state(
    settings: UrlServiceSettings,
) -> (
    AppState,
    Arc<InMemoryUrlRepository>,
    mpsc::Receiver<ClickEvent>,
) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let dyn_repository: Arc<dyn UrlRepository> = repository.clone();
    let url_service = UrlService::new(
        dyn_repository,
        Arc::new(AppCache::default()),
        tx,
        settings,
    );

    (AppState::new(Arc::new(url_service)), repository, rx)
}

pub fn spawn_app_with(settings: UrlServiceSettings) -> TestApp {
    let (state, repository, clicks) = create_test_state(settings);
    let app = routes().with_state(state.clone());
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        state,
        repository,
        clicks,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(settings())
}
