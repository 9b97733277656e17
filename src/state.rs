//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::AppCache;

/// Service handle used by the HTTP layer, erased over the storage backend.
pub type DynUrlService = UrlService<dyn UrlRepository>;

/// State shared across all request handlers.
///
/// The cache is constructed once at startup and reached only through this
/// state; there is no global instance.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<DynUrlService>,
}

impl AppState {
    pub fn new(url_service: Arc<DynUrlService>) -> Self {
        Self { url_service }
    }

    pub fn cache(&self) -> &Arc<AppCache> {
        self.url_service.cache()
    }
}
