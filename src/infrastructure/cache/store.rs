//! In-process key/value store with per-entry expiry.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Default TTL applied when `set` is called without one (10 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Construction parameters for [`CacheStore`].
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// TTL used by [`CacheStore::set`] when the caller passes `None` or zero.
    pub default_ttl: Duration,
    /// Maximum number of held keys. `None` means unbounded.
    pub max_keys: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            max_keys: None,
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Concurrent TTL cache keyed by string.
///
/// Backed by a sharded [`DashMap`], so mutations of a single key are
/// serialized by its shard lock and unrelated keys rarely contend. Expired
/// entries are invisible to [`get`](Self::get) and [`has`](Self::has) as soon
/// as their deadline passes; [`sweep`](Self::sweep) reclaims their memory.
///
/// The store never fails on its own. When `max_keys` is configured,
/// [`set`](Self::set) returns `false` for a new key once the limit is
/// reached and callers proceed without caching.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: DashMap<String, Entry<V>>,
    default_ttl: Duration,
    max_keys: Option<usize>,
}

impl<V: Clone> CacheStore<V> {
    /// Creates an unbounded store with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_config(CacheConfig {
            default_ttl,
            ..CacheConfig::default()
        })
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: config.default_ttl,
            max_keys: config.max_keys,
        }
    }

    /// Returns a clone of the live value under `key`.
    ///
    /// An expired entry reports a miss and is removed on the spot, unless a
    /// concurrent `set` has already replaced it.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                trace!(key, "cache hit");
                return Some(entry.value.clone());
            }
        } else {
            trace!(key, "cache miss");
            return None;
        }

        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        trace!(key, "cache miss (expired)");
        None
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// `ttl` of `None` or zero means the store's default TTL, not "forever".
    /// At the key limit, expired entries are swept first; `false` is returned
    /// only when live entries alone fill the store.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> bool {
        let key = key.into();
        let ttl = match ttl {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => self.default_ttl,
        };

        if let Some(max_keys) = self.max_keys
            && self.entries.len() >= max_keys
            && !self.entries.contains_key(&key)
        {
            // Dead entries must not hold slots until the next sweep.
            let reclaimed = self.sweep();
            if self.entries.len() >= max_keys {
                debug!(key = %key, max_keys, reclaimed, "cache full, entry not stored");
                return false;
            }
        }

        trace!(key = %key, ttl_secs = ttl.as_secs(), "cache set");
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        true
    }
}

impl<V> CacheStore<V> {
    /// Removes `key` regardless of expiry. Returns 1 if it was held, else 0.
    pub fn del(&self, key: &str) -> usize {
        usize::from(self.entries.remove(key).is_some())
    }

    /// Removes every listed key and returns how many were actually held.
    pub fn del_many<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().map(|key| self.del(key.as_ref())).sum()
    }

    /// Reports whether `key` holds a live entry.
    pub fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Snapshot of every held key, including expired ones not yet swept.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Removes every key starting with `prefix` and returns the count.
    ///
    /// Equivalent to deleting the result of filtering [`keys`](Self::keys)
    /// by prefix, without cloning the key set. Each shard is locked only
    /// while it is being filtered.
    pub fn remove_prefix(&self, prefix: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|key, _| {
            let matches = key.starts_with(prefix);
            if matches {
                removed += 1;
            }
            !matches
        });
        removed
    }

    /// Drops every entry.
    pub fn flush(&self) {
        self.entries.clear();
    }

    /// Reclaims expired entries and returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of held entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::with_config(CacheConfig::default())
    }
}
