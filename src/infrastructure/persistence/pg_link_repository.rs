//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::db_error::map_sqlx_error;
use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::LinkRepository;

const LINK_COLUMNS: &str = "id, short_code, original_url, click_count, owner_id, created_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    original_url: String,
    click_count: i64,
    owner_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            short_code: row.short_code,
            original_url: row.original_url,
            click_count: row.click_count,
            owner: row.owner_id,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// The `links_short_code_key` unique constraint is the authoritative guard
/// against duplicate codes.
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
    async fn create(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        let sql = format!(
            "INSERT INTO links (short_code, original_url, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.short_code)
            .bind(&new_link.original_url)
            .bind(new_link.owner)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, RepositoryError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, RepositoryError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn list(
        &self,
        owner: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, RepositoryError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS}
             FROM links
             WHERE ($1::bigint IS NULL OR owner_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(owner)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count(&self, owner: Option<i64>) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM links WHERE ($1::bigint IS NULL OR owner_id = $1)",
        )
        .bind(owner)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn increment_click_count(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
