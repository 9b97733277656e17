//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    user_id: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(
            row.id,
            row.original_url,
            row.user_id,
            row.clicks,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for URL records.
///
/// Uses bound parameters for every query; no SQL is built from input.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewUrl) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, user_id)
            VALUES ($1, $2)
            RETURNING id, original_url, user_id, clicks, created_at
            "#,
        )
        .bind(&new_url.original_url)
        .bind(&new_url.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, user_id, clicks, created_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, user_id, clicks, created_at
            FROM urls
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_user_by_clicks(&self, user_id: &str) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, user_id, clicks, created_at
            FROM urls
            WHERE user_id = $1
            ORDER BY clicks DESC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>("DELETE FROM urls WHERE user_id = $1 RETURNING id")
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(ids)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
