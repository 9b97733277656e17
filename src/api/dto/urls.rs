//! DTOs for the URL endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::sync::Arc;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Pagination, UrlPage, UrlView};

/// Longest accepted user id.
const MAX_USER_ID_LEN: usize = 128;

/// Largest page size a client may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// User ids become part of cache keys, so the key separator is rejected.
fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::new("user_id_empty").with_message("User ID is required".into()));
    }
    if user_id.len() > MAX_USER_ID_LEN {
        return Err(ValidationError::new("user_id_too_long")
            .with_message(format!("User ID must be at most {MAX_USER_ID_LEN} characters").into()));
    }
    if user_id.contains(':') {
        return Err(ValidationError::new("user_id_separator")
            .with_message("User ID must not contain ':'".into()));
    }
    Ok(())
}

/// An empty owner id on create means an anonymous URL.
fn validate_owner_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.is_empty() {
        return Ok(());
    }
    validate_user_id(user_id)
}

/// Body of `POST /urls`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    /// Destination URL (must be a valid absolute URL).
    #[validate(url(message = "Original URL must be a valid URL"))]
    #[validate(length(max = 2048, message = "Original URL is too long"))]
    pub original_url: String,

    /// Owner of the URL. Absent or empty means the guest user.
    #[validate(custom(function = "validate_owner_id"))]
    pub user_id: Option<String>,
}

impl CreateUrlRequest {
    /// Owner id with an empty string treated as absent.
    pub fn owner(&self) -> Option<String> {
        self.user_id.clone().filter(|id| !id.is_empty())
    }
}

/// Query of `GET /urls`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListUrlsQuery {
    #[validate(
        required(message = "User ID is required"),
        custom(function = "validate_user_id")
    )]
    pub user_id: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(max = MAX_PAGE_LIMIT, message = "Limit is too large"))]
    pub limit: Option<u32>,
}

impl ListUrlsQuery {
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or_default()
    }
}

/// Query of `DELETE /urls/{id}`.
///
/// When `userId` is present the URL must belong to that user, and the
/// refreshed listing page is returned.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUrlQuery {
    #[validate(custom(function = "validate_user_id"))]
    pub user_id: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(max = MAX_PAGE_LIMIT, message = "Limit is too large"))]
    pub limit: Option<u32>,
}

/// Query naming a single user, for `DELETE /urls` and `GET /urls/stats`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[validate(
        required(message = "User ID is required"),
        custom(function = "validate_user_id")
    )]
    pub user_id: Option<String>,
}

impl UserQuery {
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or_default()
    }
}

/// A status message and/or a listing page, flattened into one object.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,

    #[serde(flatten)]
    pub page: Option<Arc<UrlPage>>,
}

impl UrlListResponse {
    pub fn new(message: Option<&'static str>, page: Arc<UrlPage>) -> Self {
        Self {
            message,
            page: Some(page),
        }
    }

    pub fn message_only(message: &'static str) -> Self {
        Self {
            message: Some(message),
            page: None,
        }
    }

    /// Single-entry page describing a URL created without an owner.
    pub fn single(message: &'static str, url: UrlView) -> Self {
        Self::new(
            Some(message),
            Arc::new(UrlPage {
                urls: vec![url],
                pagination: Pagination {
                    total: 1,
                    page: 1,
                    limit: 1,
                    has_more: false,
                },
            }),
        )
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid: CreateUrlRequest = serde_json::from_str(
            r#"{"originalUrl": "https://example.com/a", "userId": "u1"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.owner().as_deref(), Some("u1"));

        let bad_url: CreateUrlRequest =
            serde_json::from_str(r#"{"originalUrl": "not a url"}"#).unwrap();
        assert!(bad_url.validate().is_err());

        let bad_user: CreateUrlRequest = serde_json::from_str(
            r#"{"originalUrl": "https://example.com", "userId": "a:b"}"#,
        )
        .unwrap();
        assert!(bad_user.validate().is_err());

        let empty_user: CreateUrlRequest = serde_json::from_str(
            r#"{"originalUrl": "https://example.com", "userId": ""}"#,
        )
        .unwrap();
        assert!(empty_user.validate().is_ok());
        assert_eq!(empty_user.owner(), None);
    }

    #[test]
    fn test_user_id_rules() {
        assert!(validate_user_id("u-42").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("   ").is_err());
        assert!(validate_user_id("user:1").is_err());
        assert!(validate_user_id(&"x".repeat(MAX_USER_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_list_query_requires_user() {
        let query = ListUrlsQuery {
            user_id: None,
            page: None,
            limit: None,
        };
        assert!(query.validate().is_err());

        let query = ListUrlsQuery {
            user_id: Some("u".to_string()),
            page: Some(0),
            limit: Some(MAX_PAGE_LIMIT + 1),
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_list_response_flattens_page() {
        let response = UrlListResponse::single(
            "URL created successfully",
            UrlView {
                id: 1,
                original_url: "https://example.com".to_string(),
                short_url: "https://sho.rt/r/B".to_string(),
                user_id: "0".to_string(),
                clicks: 0,
                created_at: "2025-01-01 00:00:00".to_string(),
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "URL created successfully");
        assert_eq!(json["urls"][0]["shortUrl"], "https://sho.rt/r/B");
        assert_eq!(json["pagination"]["hasMore"], false);

        let json = serde_json::to_value(UrlListResponse::message_only("done")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "done" }));
    }
}
