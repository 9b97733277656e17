//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistent store of URL records.
///
/// The store assigns identifiers and owns click counts. The service layer
/// consults the cache before calling into it and invalidates the cache after
/// every write; implementations know nothing about caching.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - DashMap-backed
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_url: NewUrl) -> Result<UrlRecord, AppError>;

    /// Finds a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Lists a user's records newest first.
    ///
    /// # Arguments
    ///
    /// - `offset` - Number of records to skip
    /// - `limit` - Maximum number of records returned
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<UrlRecord>, AppError>;

    /// Lists every record of a user ordered by clicks, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_user_by_clicks(&self, user_id: &str) -> Result<Vec<UrlRecord>, AppError>;

    /// Counts a user's records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError>;

    /// Adds one to the click counter. Returns `false` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes a record. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes every record of a user and returns the removed ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_user(&self, user_id: &str) -> Result<Vec<i64>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
