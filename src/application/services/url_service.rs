//! Read-through orchestration of URL creation, redirects and listings.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{NewUrl, Pagination, TopUrl, UrlPage, UrlView, UserStats};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{
    AppCache, CachedValue, url_cache_key, user_prefix, user_stats_cache_key, user_urls_cache_key,
    user_urls_prefix,
};
use crate::utils::short_code;

/// Page served when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 5;

/// Number of URLs reported in [`UserStats::top_urls`].
const TOP_URLS: usize = 5;

/// Lifetimes of the cache entry families.
#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub url: Duration,
    pub listing: Duration,
    pub stats: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            url: Duration::from_secs(24 * 60 * 60),
            listing: Duration::from_secs(5 * 60),
            stats: Duration::from_secs(10 * 60),
        }
    }
}

/// Tunables of [`UrlService`].
#[derive(Debug, Clone)]
pub struct UrlServiceSettings {
    /// Domain prefix for rendered short URLs. `None` uses the codec placeholder.
    pub short_domain: Option<String>,
    /// Maximum number of URLs a named user may own.
    pub max_urls_per_user: i64,
    pub ttls: CacheTtls,
}

impl Default for UrlServiceSettings {
    fn default() -> Self {
        Self {
            short_domain: None,
            max_urls_per_user: 20,
            ttls: CacheTtls::default(),
        }
    }
}

/// Result of [`UrlService::create_url`].
#[derive(Debug, Clone)]
pub struct CreatedUrl {
    pub url: UrlView,
    /// First listing page of the owner, present when a user id was given.
    pub listing: Option<UrlPage>,
}

/// Service sitting between the HTTP layer, the cache and the store.
///
/// Reads consult the cache first and fill it on a miss. Writes go to the store
/// and then invalidate every entry whose content could be stale; the only
/// entry populated on write is the new URL's own destination.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<AppCache>,
    click_sender: mpsc::Sender<ClickEvent>,
    settings: UrlServiceSettings,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    pub fn new(
        repository: Arc<R>,
        cache: Arc<AppCache>,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: UrlServiceSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            click_sender,
            settings,
        }
    }

    pub fn cache(&self) -> &Arc<AppCache> {
        &self.cache
    }

    pub fn click_sender(&self) -> &mpsc::Sender<ClickEvent> {
        &self.click_sender
    }

    /// Builds the public short URL of `id` under the configured domain.
    pub fn short_url(&self, id: u64) -> String {
        short_code::build_short_url(id, self.settings.short_domain.as_deref())
    }

    /// Probes the persistent store.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Stores a new URL and primes its redirect cache entry.
    ///
    /// Every cached listing of the stored owner is dropped, the guest user
    /// included. For a named user the per-user URL limit is enforced and the
    /// recomputed first page is returned with the new URL at its head.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] when the user is at the URL limit.
    /// Store errors propagate unchanged.
    pub async fn create_url(
        &self,
        original_url: String,
        user_id: Option<String>,
    ) -> Result<CreatedUrl, AppError> {
        if let Some(user_id) = user_id.as_deref() {
            let owned = self.repository.count_by_user(user_id).await?;
            if owned >= self.settings.max_urls_per_user {
                return Err(AppError::forbidden(
                    format!(
                        "You have reached the maximum limit of {} URLs. Please delete some URLs to create new ones.",
                        self.settings.max_urls_per_user
                    ),
                    json!({ "limit": self.settings.max_urls_per_user }),
                ));
            }
        }

        let record = self
            .repository
            .create(NewUrl::new(original_url, user_id.clone()))
            .await?;

        self.cache_put(
            url_cache_key(record.id),
            CachedValue::Url(record.original_url.clone()),
            self.settings.ttls.url,
        );

        let view = UrlView::from_record(&record, self.settings.short_domain.as_deref());
        self.invalidate_user_listings(&record.user_id);

        let listing = match user_id.as_deref() {
            Some(user_id) => {
                let mut page = self
                    .list_user_urls(user_id, Some(DEFAULT_PAGE), Some(DEFAULT_LIMIT))
                    .await?
                    .as_ref()
                    .clone();

                if !page.urls.is_empty() && !page.contains(record.id) {
                    page.urls.insert(0, view.clone());
                    page.pagination.total += 1;
                }

                Some(page)
            }
            None => None,
        };

        debug!(id = record.id, short_url = %view.short_url, "URL created");

        Ok(CreatedUrl { url: view, listing })
    }

    /// Resolves a short code to its destination and records the click.
    ///
    /// A cache hit does not touch the store for the destination. Either way a
    /// click event is queued; the cached entry holds only the destination, so
    /// counting never stales it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for a malformed code or an unknown id.
    pub async fn resolve_redirect(&self, code: &str) -> Result<String, AppError> {
        let id = i64::try_from(short_code::decode(code)?).map_err(|_| {
            AppError::not_found("URL not found", json!({ "short_code": code }))
        })?;

        let key = url_cache_key(id);

        if let Some(CachedValue::Url(destination)) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            self.record_click(id);
            return Ok(destination);
        }

        debug!(key = %key, "Cache miss");
        let record = self.repository.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found("URL not found", json!({ "short_code": code }))
        })?;

        self.cache_put(
            key,
            CachedValue::Url(record.original_url.clone()),
            self.settings.ttls.url,
        );
        self.record_click(id);

        Ok(record.original_url)
    }

    /// Returns one page of a user's URLs, newest first.
    ///
    /// `page` and `limit` below 1 are raised to 1. A page past the end is
    /// clamped to the last page (page 1 when the user has no URLs); the
    /// served page number is reported in the pagination metadata while the
    /// cache slot stays keyed by the requested page.
    ///
    /// # Errors
    ///
    /// Store errors propagate unchanged.
    pub async fn list_user_urls(
        &self,
        user_id: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Arc<UrlPage>, AppError> {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);

        let key = user_urls_cache_key(user_id, page, limit);

        if let Some(CachedValue::Listing(cached)) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(cached);
        }

        debug!(key = %key, "Cache miss");
        let total = self.repository.count_by_user(user_id).await?;

        let limit_i64 = i64::from(limit);
        let total_pages = (total + limit_i64 - 1) / limit_i64;
        let served_page = if total_pages > 0 {
            u32::try_from(i64::from(page).min(total_pages)).unwrap_or(page)
        } else {
            1
        };
        let offset = i64::from(served_page - 1) * limit_i64;

        let records = self
            .repository
            .list_by_user(user_id, offset, limit_i64)
            .await?;

        let returned = i64::try_from(records.len()).unwrap_or(i64::MAX);
        let domain = self.settings.short_domain.as_deref();
        let listing = Arc::new(UrlPage {
            urls: records
                .iter()
                .map(|record| UrlView::from_record(record, domain))
                .collect(),
            pagination: Pagination {
                total,
                page: served_page,
                limit,
                has_more: offset + returned < total,
            },
        });

        self.cache_put(
            key,
            CachedValue::Listing(Arc::clone(&listing)),
            self.settings.ttls.listing,
        );

        Ok(listing)
    }

    /// Deletes one URL and drops every cache entry it could appear in.
    ///
    /// The owner's listings are invalidated whether or not `user_id` is
    /// given. When it is, the URL must belong to that user and the
    /// recomputed listing page for `page`/`limit` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL does not exist and
    /// [`AppError::Forbidden`] if it belongs to another user.
    pub async fn delete_url(
        &self,
        id: i64,
        user_id: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Option<Arc<UrlPage>>, AppError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;

        if let Some(user_id) = user_id
            && !record.is_owned_by(user_id)
        {
            return Err(AppError::forbidden(
                "You are not authorized to delete this URL",
                json!({ "id": id }),
            ));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("URL not found", json!({ "id": id })));
        }

        self.cache.del(&url_cache_key(id));
        self.invalidate_user_listings(&record.user_id);

        match user_id {
            Some(user_id) => {
                let listing = self.list_user_urls(user_id, page, limit).await?;
                Ok(Some(listing))
            }
            None => Ok(None),
        }
    }

    /// Deletes every URL of a user and all cache entries derived from them.
    ///
    /// Returns the number of deleted URLs.
    ///
    /// # Errors
    ///
    /// Store errors propagate unchanged.
    pub async fn delete_all_user_urls(&self, user_id: &str) -> Result<usize, AppError> {
        let ids = self.repository.delete_by_user(user_id).await?;

        self.cache.del_many(ids.iter().map(|id| url_cache_key(*id)));
        let removed = self.cache.remove_prefix(&user_prefix(user_id));
        debug!(user_id, urls = ids.len(), cache_keys = removed, "Deleted all user URLs");

        Ok(ids.len())
    }

    /// Returns click totals and the most clicked URLs of a user.
    ///
    /// # Errors
    ///
    /// Store errors propagate unchanged.
    pub async fn user_stats(&self, user_id: &str) -> Result<Arc<UserStats>, AppError> {
        let key = user_stats_cache_key(user_id);

        if let Some(CachedValue::Stats(cached)) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(cached);
        }

        debug!(key = %key, "Cache miss");
        let records = self.repository.list_by_user_by_clicks(user_id).await?;
        let domain = self.settings.short_domain.as_deref();

        let stats = Arc::new(UserStats {
            total_clicks: records.iter().map(|record| record.clicks).sum(),
            total_urls: records.len(),
            top_urls: records
                .iter()
                .take(TOP_URLS)
                .map(|record| TopUrl::from(UrlView::from_record(record, domain)))
                .collect(),
        });

        self.cache_put(
            key,
            CachedValue::Stats(Arc::clone(&stats)),
            self.settings.ttls.stats,
        );

        Ok(stats)
    }

    /// Drops every cached listing page of `user_id`, whatever its page size.
    pub fn invalidate_user_listings(&self, user_id: &str) -> usize {
        let removed = self.cache.remove_prefix(&user_urls_prefix(user_id));
        if removed > 0 {
            debug!(user_id, removed, "Invalidated cached listings");
        }
        removed
    }

    fn cache_put(&self, key: String, value: CachedValue, ttl: Duration) {
        if !self.cache.set(key.clone(), value, Some(ttl)) {
            warn!(key = %key, "Cache rejected entry, continuing without caching");
        }
    }

    fn record_click(&self, url_id: i64) {
        match self.click_sender.try_send(ClickEvent::new(url_id)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!(url_id, "Click queue full, click dropped"),
            Err(TrySendError::Closed(_)) => warn!(url_id, "Click queue closed, click dropped"),
        }
    }
}
