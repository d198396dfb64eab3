//! DTOs for the analytics dashboard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::application::services::Dashboard;
use crate::domain::repositories::{BreakdownEntry, DailyCount};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_links: i64,
    pub total_clicks: i64,
    pub distinct_countries: i64,
    pub average_clicks_per_link: f64,
    pub daily_clicks: Vec<DailyClicks>,
    pub countries: Vec<BreakdownItem>,
    pub devices: Vec<BreakdownItem>,
    pub browsers: Vec<BreakdownItem>,
}

#[derive(Debug, Serialize)]
pub struct DailyClicks {
    pub date: NaiveDate,
    pub clicks: i64,
}

#[derive(Debug, Serialize)]
pub struct BreakdownItem {
    pub label: String,
    pub clicks: i64,
}

impl From<DailyCount> for DailyClicks {
    fn from(count: DailyCount) -> Self {
        Self {
            date: count.day,
            clicks: count.clicks,
        }
    }
}

impl From<BreakdownEntry> for BreakdownItem {
    fn from(entry: BreakdownEntry) -> Self {
        Self {
            label: entry.label,
            clicks: entry.clicks,
        }
    }
}

impl From<Dashboard> for DashboardResponse {
    fn from(d: Dashboard) -> Self {
        Self {
            total_links: d.total_links,
            total_clicks: d.total_clicks,
            distinct_countries: d.distinct_countries,
            average_clicks_per_link: d.average_clicks_per_link,
            daily_clicks: d.daily_clicks.into_iter().map(Into::into).collect(),
            countries: d.countries.into_iter().map(Into::into).collect(),
            devices: d.devices.into_iter().map(Into::into).collect(),
            browsers: d.browsers.into_iter().map(Into::into).collect(),
        }
    }
}
