//! Background task reclaiming expired cache entries.

use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use super::store::CacheStore;

/// Default interval between sweeps (2 minutes).
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(120);

/// Spawns a task that calls [`CacheStore::sweep`] every `period`.
///
/// The task holds only a weak reference and exits once the last strong
/// handle to the cache is dropped. Sweeping locks one shard at a time, so
/// request handlers touching other shards are not blocked.
pub fn spawn_sweeper<V>(cache: &Arc<CacheStore<V>>, period: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let cache: Weak<CacheStore<V>> = Arc::downgrade(cache);

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let Some(cache) = cache.upgrade() else {
                debug!("Cache dropped, stopping sweeper");
                break;
            };

            let removed = cache.sweep();
            if removed > 0 {
                debug!(removed, remaining = cache.len(), "Swept expired cache entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_reclaims_expired_entries() {
        let cache: Arc<CacheStore<String>> = Arc::new(CacheStore::default());
        cache.set("short", "v".to_string(), Some(Duration::from_secs(1)));
        cache.set("long", "v".to_string(), Some(Duration::from_secs(3_600)));

        let _handle = spawn_sweeper(&cache, Duration::from_secs(120));

        tokio::time::sleep(Duration::from_secs(121)).await;

        assert_eq!(cache.keys(), vec!["long".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_leaves_entries_before_first_period() {
        let cache: Arc<CacheStore<String>> = Arc::new(CacheStore::default());
        cache.set("short", "v".to_string(), Some(Duration::from_secs(1)));

        let _handle = spawn_sweeper(&cache, Duration::from_secs(120));

        tokio::time::sleep(Duration::from_secs(60)).await;

        // Expired but not yet reclaimed; reads already miss.
        assert_eq!(cache.len(), 1);
        assert!(!cache.has("short"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_cache_dropped() {
        let cache: Arc<CacheStore<String>> = Arc::new(CacheStore::default());
        let handle = spawn_sweeper(&cache, Duration::from_secs(1));

        drop(cache);
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert!(handle.is_finished());
    }
}
