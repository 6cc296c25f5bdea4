//! PostgreSQL implementation of the link repository.
//!
//! The `UNIQUE` constraint on `links.short_code` is the authoritative
//! uniqueness guard; unique violations surface as [`AppError::Conflict`]
//! through the `From<sqlx::Error>` conversion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, original_url, short_code, owner_id, clicks, \
                            created_at, last_used_at, expires_at, is_custom";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    owner_id: Option<i64>,
    clicks: i64,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    is_custom: bool,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            owner_id: row.owner_id,
            clicks: row.clicks,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
            expires_at: row.expires_at,
            is_custom: row.is_custom,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (original_url, short_code, owner_id, expires_at, is_custom) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.original_url)
            .bind(&new_link.short_code)
            .bind(new_link.owner_id)
            .bind(new_link.expires_at)
            .bind(new_link.is_custom)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, link: &Link) -> Result<Link, AppError> {
        let sql = format!(
            "UPDATE links \
             SET original_url = $1, short_code = $2, expires_at = $3, is_custom = $4 \
             WHERE id = $5 \
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&link.original_url)
            .bind(&link.short_code)
            .bind(link.expires_at)
            .bind(link.is_custom)
            .bind(link.id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "id": link.id }))
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_usage(&self, id: i64, now: DateTime<Utc>) -> Result<(), AppError> {
        // Single atomic statement so concurrent redirects never lose a click.
        sqlx::query("UPDATE links SET clicks = clicks + 1, last_used_at = $1 WHERE id = $2")
            .bind(now)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn search_by_url(
        &self,
        fragment: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE original_url ILIKE $1 AND (expires_at IS NULL OR expires_at >= $2) \
             ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(format!("%{fragment}%"))
            .bind(now)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
