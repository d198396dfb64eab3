//! PostgreSQL implementation of the click log and reporting queries.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::db_error::map_sqlx_error;
use crate::domain::entities::{Click, NewClick};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::{BreakdownEntry, ClickDimension, ClickRepository, DailyCount};

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    country: String,
    user_agent: Option<String>,
    browser: String,
    device: String,
    created_at: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Self {
            id: row.id,
            link_id: row.link_id,
            country: row.country,
            user_agent: row.user_agent,
            browser: row.browser,
            device: row.device,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DailyRow {
    day: NaiveDate,
    clicks: i64,
}

#[derive(sqlx::FromRow)]
struct BreakdownRow {
    label: String,
    clicks: i64,
}

/// PostgreSQL repository for click tracking and analytics.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, RepositoryError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (link_id, country, user_agent, browser, device)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, link_id, country, user_agent, browser, device, created_at
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.country)
        .bind(&new_click.user_agent)
        .bind(&new_click.browser)
        .bind(&new_click.device)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn daily_counts(&self, since: DateTime<Utc>) -> Result<Vec<DailyCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS clicks
            FROM clicks
            WHERE created_at >= $1
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|r| DailyCount {
                day: r.day,
                clicks: r.clicks,
            })
            .collect())
    }

    async fn breakdown(
        &self,
        dimension: ClickDimension,
        limit: i64,
    ) -> Result<Vec<BreakdownEntry>, RepositoryError> {
        // Column names come from a closed enum, never from input.
        let column = dimension.column();
        let sql = format!(
            "SELECT {column} AS label, COUNT(*) AS clicks
             FROM clicks
             GROUP BY {column}
             ORDER BY clicks DESC, label
             LIMIT $1"
        );

        let rows = sqlx::query_as::<_, BreakdownRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|r| BreakdownEntry {
                label: r.label,
                clicks: r.clicks,
            })
            .collect())
    }

    async fn distinct_count(&self, dimension: ClickDimension) -> Result<i64, RepositoryError> {
        let sql = format!("SELECT COUNT(DISTINCT {}) FROM clicks", dimension.column());

        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, link_id, country, user_agent, browser, device, created_at
            FROM clicks
            WHERE link_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Click::from).collect())
    }
}
