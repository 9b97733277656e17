//! URL record entity as stored by the persistent store.

use chrono::{DateTime, Utc};

/// Owner id used for URLs created without a user.
pub const GUEST_USER_ID: &str = "0";

/// A stored URL record.
///
/// `id` is assigned by the store on insert and never changes; the short code
/// is derived from it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub user_id: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    pub fn new(
        id: i64,
        original_url: String,
        user_id: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            user_id,
            clicks,
            created_at,
        }
    }

    /// Identifier in the codec's numeric domain.
    ///
    /// Store identifiers are never negative; a negative value maps to 0.
    pub fn code_id(&self) -> u64 {
        u64::try_from(self.id).unwrap_or_default()
    }

    /// Returns true if the record belongs to `user_id`.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a new URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrl {
    pub original_url: String,
    pub user_id: String,
}

impl NewUrl {
    /// Creates the input for `user_id`, falling back to the guest owner.
    pub fn new(original_url: String, user_id: Option<String>) -> Self {
        Self {
            original_url,
            user_id: user_id.unwrap_or_else(|| GUEST_USER_ID.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_record_creation() {
        let now = Utc::now();
        let record = UrlRecord::new(
            7,
            "https://example.com".to_string(),
            "u1".to_string(),
            3,
            now,
        );

        assert_eq!(record.id, 7);
        assert_eq!(record.code_id(), 7);
        assert_eq!(record.clicks, 3);
        assert_eq!(record.created_at, now);
        assert!(record.is_owned_by("u1"));
        assert!(!record.is_owned_by("u2"));
    }

    #[test]
    fn test_negative_id_maps_to_zero() {
        let record = UrlRecord::new(-1, "https://x.io".to_string(), "u".to_string(), 0, Utc::now());
        assert_eq!(record.code_id(), 0);
    }

    #[test]
    fn test_new_url_guest_fallback() {
        let anonymous = NewUrl::new("https://example.com".to_string(), None);
        assert_eq!(anonymous.user_id, GUEST_USER_ID);

        let owned = NewUrl::new("https://example.com".to_string(), Some("u9".to_string()));
        assert_eq!(owned.user_id, "u9");
    }
}
