//! Rendered payloads for listings and statistics.
//!
//! These are the values held by listing and stats cache entries. Field names
//! serialize in camelCase to match the public JSON API.

use serde::Serialize;

use super::url::UrlRecord;
use crate::utils::short_code::build_short_url;

/// Timestamp layout used in rendered payloads (UTC, second precision).
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A URL record with its public short URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlView {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub user_id: String,
    pub clicks: i64,
    pub created_at: String,
}

impl UrlView {
    /// Renders a record, building the short URL under `domain`.
    pub fn from_record(record: &UrlRecord, domain: Option<&str>) -> Self {
        Self {
            id: record.id,
            original_url: record.original_url.clone(),
            short_url: build_short_url(record.code_id(), domain),
            user_id: record.user_id.clone(),
            clicks: record.clicks,
            created_at: record.created_at.format(CREATED_AT_FORMAT).to_string(),
        }
    }
}

/// Pagination metadata of a listing page.
///
/// `page` is the page actually served, which may be lower than the one
/// requested when the request ran past the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

/// One page of a user's URLs, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlPage {
    pub urls: Vec<UrlView>,
    pub pagination: Pagination,
}

impl UrlPage {
    pub fn contains(&self, id: i64) -> bool {
        self.urls.iter().any(|url| url.id == id)
    }
}

/// Entry of [`UserStats::top_urls`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUrl {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: String,
}

impl From<UrlView> for TopUrl {
    fn from(view: UrlView) -> Self {
        Self {
            id: view.id,
            original_url: view.original_url,
            short_url: view.short_url,
            clicks: view.clicks,
            created_at: view.created_at,
        }
    }
}

/// Click summary over all URLs of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_clicks: i64,
    pub total_urls: usize,
    pub top_urls: Vec<TopUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: i64) -> UrlRecord {
        UrlRecord::new(
            id,
            "https://example.com/a".to_string(),
            "u1".to_string(),
            4,
            Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap(),
        )
    }

    #[test]
    fn test_view_renders_short_url_and_timestamp() {
        let view = UrlView::from_record(&record(123), Some("https://sho.rt"));

        assert_eq!(view.short_url, "https://sho.rt/r/B9");
        assert_eq!(view.created_at, "2025-03-09 14:05:07");
        assert_eq!(view.clicks, 4);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = UrlView::from_record(&record(1), None);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["originalUrl"], "https://example.com/a");
        assert_eq!(json["shortUrl"], "short.url/r/B");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["createdAt"], "2025-03-09 14:05:07");
    }

    #[test]
    fn test_page_serializes_has_more() {
        let page = UrlPage {
            urls: vec![UrlView::from_record(&record(1), None)],
            pagination: Pagination {
                total: 6,
                page: 1,
                limit: 5,
                has_more: true,
            },
        };

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pagination"]["hasMore"], true);
        assert_eq!(json["urls"][0]["id"], 1);
        assert!(page.contains(1));
        assert!(!page.contains(2));
    }
}
