//! In-process read-through cache for URL lookups and listings.
//!
//! - [`CacheStore`] - Concurrent TTL key/value store with passive expiry
//! - [`keys`] - Key builders for every entry family
//! - [`spawn_sweeper`] - Periodic reclamation of expired entries
//! - [`CachedValue`] / [`AppCache`] - The payloads the service stores
//!
//! The cache is read-through, not write-through: writes to the store are
//! followed by invalidation, with one exception: a newly created URL's
//! single-URL entry is populated right away.

pub mod keys;
mod store;
mod sweeper;

use std::sync::Arc;

use crate::domain::entities::{UrlPage, UserStats};

pub use keys::{
    url_cache_key, user_prefix, user_stats_cache_key, user_urls_cache_key, user_urls_prefix,
};
pub use store::{CacheConfig, CacheStore, DEFAULT_TTL};
pub use sweeper::{DEFAULT_CHECK_PERIOD, spawn_sweeper};

/// Value held by an application cache entry.
///
/// Listing and stats payloads sit behind `Arc` so a hit clones a pointer,
/// not the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// Destination of a single URL, keyed by [`url_cache_key`].
    Url(String),
    /// A listing page, keyed by [`user_urls_cache_key`].
    Listing(Arc<UrlPage>),
    /// Click summary, keyed by [`user_stats_cache_key`].
    Stats(Arc<UserStats>),
}

/// The cache shared by request handlers.
pub type AppCache = CacheStore<CachedValue>;
