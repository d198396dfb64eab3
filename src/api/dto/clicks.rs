//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Click;

/// Individual click event information.
///
/// Optional fields are omitted from JSON when `None` for cleaner responses.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub clicked_at: DateTime<Utc>,
    pub country: String,
    pub browser: String,
    pub device: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            clicked_at: click.created_at,
            country: click.country,
            browser: click.browser,
            device: click.device,
            user_agent: click.user_agent,
        }
    }
}

/// Recent clicks of one link.
#[derive(Debug, Serialize)]
pub struct ClickListResponse {
    pub link_id: i64,
    pub short_code: String,
    pub click_count: i64,
    pub items: Vec<ClickInfo>,
}

/// Query parameters for the recent clicks endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ClicksQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ClicksQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 500;

    /// Requested limit clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}
