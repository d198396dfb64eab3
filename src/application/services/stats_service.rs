//! Click statistics and analytics service.

use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta, Utc};

use crate::domain::entities::Click;
use crate::domain::errors::ShortenError;
use crate::domain::repositories::{
    BreakdownEntry, ClickDimension, ClickRepository, DailyCount, LinkRepository,
};

/// Days covered by the daily click series.
pub const DAILY_WINDOW_DAYS: i64 = 30;

/// Entries kept per breakdown.
pub const BREAKDOWN_LIMIT: i64 = 10;

/// Aggregates shown on the analytics dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub total_links: i64,
    pub total_clicks: i64,
    pub distinct_countries: i64,
    pub average_clicks_per_link: f64,
    /// One entry per day of the window, oldest first, including empty days.
    pub daily_clicks: Vec<DailyCount>,
    pub countries: Vec<BreakdownEntry>,
    pub devices: Vec<BreakdownEntry>,
    pub browsers: Vec<BreakdownEntry>,
}

/// Service for retrieving click statistics and analytics.
pub struct StatsService {
    link_repository: Arc<dyn LinkRepository>,
    click_repository: Arc<dyn ClickRepository>,
}

impl StatsService {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
    ) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Builds the dashboard over all links and clicks.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::PersistenceUnavailable`] if any query fails.
    pub async fn dashboard(&self) -> Result<Dashboard, ShortenError> {
        let today = Utc::now().date_naive();
        let first_day = today - TimeDelta::days(DAILY_WINDOW_DAYS - 1);
        let since = first_day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();

        let (total_links, total_clicks, distinct_countries, daily, countries, devices, browsers) = tokio::try_join!(
            self.link_repository.count(None),
            self.click_repository.count_all(),
            self.click_repository
                .distinct_count(ClickDimension::Country),
            self.click_repository.daily_counts(since),
            self.click_repository
                .breakdown(ClickDimension::Country, BREAKDOWN_LIMIT),
            self.click_repository
                .breakdown(ClickDimension::Device, BREAKDOWN_LIMIT),
            self.click_repository
                .breakdown(ClickDimension::Browser, BREAKDOWN_LIMIT),
        )?;

        Ok(Dashboard {
            total_links,
            total_clicks,
            distinct_countries,
            average_clicks_per_link: average(total_clicks, total_links),
            daily_clicks: fill_days(first_day, today, daily),
            countries,
            devices,
            browsers,
        })
    }

    /// Most recent clicks of one link, newest first.
    pub async fn recent_clicks(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, ShortenError> {
        Ok(self.click_repository.recent_for_link(link_id, limit).await?)
    }
}

fn average(clicks: i64, links: i64) -> f64 {
    if links == 0 {
        return 0.0;
    }
    let avg = clicks as f64 / links as f64;
    (avg * 100.0).round() / 100.0
}

/// Expands sparse per-day counts into a dense series from `first` to `last`.
fn fill_days(first: NaiveDate, last: NaiveDate, counts: Vec<DailyCount>) -> Vec<DailyCount> {
    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| DailyCount {
            day,
            clicks: counts
                .iter()
                .find(|c| c.day == day)
                .map_or(0, |c| c.clicks),
        })
        .collect()
}
