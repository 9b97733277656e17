//! Cache key builders.
//!
//! Every key the service writes is produced here so that invalidation
//! prefixes always line up with the keys they are meant to clear.
//!
//! | Family  | Key                                    |
//! |---------|----------------------------------------|
//! | URL     | `url:<id>`                             |
//! | Listing | `user:<user_id>:urls:<page>:<limit>`   |
//! | Stats   | `user:<user_id>:stats`                 |

/// Key of the single-URL entry for an identifier.
pub fn url_cache_key(id: i64) -> String {
    format!("url:{id}")
}

/// Key of one listing page. Distinct page sizes occupy distinct slots.
pub fn user_urls_cache_key(user_id: &str, page: u32, limit: u32) -> String {
    format!("user:{user_id}:urls:{page}:{limit}")
}

/// Prefix shared by every listing page of a user.
pub fn user_urls_prefix(user_id: &str) -> String {
    format!("user:{user_id}:urls:")
}

pub fn user_stats_cache_key(user_id: &str) -> String {
    format!("user:{user_id}:stats")
}

/// Prefix shared by every per-user entry (listings and stats).
pub fn user_prefix(user_id: &str) -> String {
    format!("user:{user_id}:")
}
