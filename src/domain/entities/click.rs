//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link is resolved.
///
/// `browser` and `device` are classified from the user agent when the click
/// is recorded so reporting can group on them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub country: String,
    pub user_agent: Option<String>,
    pub browser: String,
    pub device: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a click. The timestamp is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: i64,
    pub country: String,
    pub user_agent: Option<String>,
    pub browser: String,
    pub device: String,
}
