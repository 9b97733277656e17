//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Replenishment interval: one request every 6 seconds per client.
const REPLENISH_EVERY_MS: u64 = 6_000;

/// Requests a client may send in a burst.
const BURST_SIZE: u32 = 100;

/// Applies per-client rate limiting to `router`.
///
/// Only the `/urls` management routes are wrapped; redirects stay unlimited.
///
/// # Limits
///
/// - **Burst**: 100 requests
/// - **Rate**: one request replenished every 6 seconds (100 per 10 minutes)
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Clients are keyed by the socket peer address. With `behind_proxy` the IP
/// is read from `X-Forwarded-For` / `X-Real-IP` / `Forwarded` first; enable
/// only behind a trusted reverse proxy.
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor))
    } else {
        router.layer(layer(PeerIpKeyExtractor))
    }
}

fn layer<K>(key_extractor: K) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    GovernorLayer::new(config(key_extractor))
}

fn config<K: KeyExtractor>(key_extractor: K) -> Arc<GovernorConfig<K, NoOpMiddleware<QuantaInstant>>> {
    let config = GovernorConfigBuilder::default()
        .per_millisecond(REPLENISH_EVERY_MS)
        .burst_size(BURST_SIZE)
        .key_extractor(key_extractor)
        .finish()
        .unwrap();

    Arc::new(config)
}
