//! Repository trait for the click log and reporting queries.

use crate::domain::entities::{Click, NewClick};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Click attribute used for grouped reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDimension {
    Country,
    Device,
    Browser,
}

impl ClickDimension {
    /// Column holding this attribute in the `clicks` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Device => "device",
            Self::Browser => "browser",
        }
    }

    pub fn value_of(self, click: &Click) -> &str {
        match self {
            Self::Country => &click.country,
            Self::Device => &click.device,
            Self::Browser => &click.browser,
        }
    }
}

/// Number of clicks recorded on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub clicks: i64,
}

/// Number of clicks sharing one attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownEntry {
    pub label: String,
    pub clicks: i64,
}

/// Repository interface for click tracking and reporting.
///
/// Clicks are append-only; nothing here updates or deletes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the referenced link is gone.
    async fn record(&self, new_click: NewClick) -> Result<Click, RepositoryError>;

    async fn count_all(&self) -> Result<i64, RepositoryError>;

    /// Clicks per UTC day since `since`, oldest first. Days without clicks are omitted.
    async fn daily_counts(&self, since: DateTime<Utc>) -> Result<Vec<DailyCount>, RepositoryError>;

    /// Clicks grouped by `dimension`, largest groups first.
    async fn breakdown(
        &self,
        dimension: ClickDimension,
        limit: i64,
    ) -> Result<Vec<BreakdownEntry>, RepositoryError>;

    /// Number of distinct values recorded for `dimension`.
    async fn distinct_count(&self, dimension: ClickDimension) -> Result<i64, RepositoryError>;

    /// Most recent clicks of one link, newest first.
    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, RepositoryError>;
}
