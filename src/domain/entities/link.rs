//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code mapped to its destination URL.
///
/// `click_count` is a denormalized counter maintained by the redirect flow.
/// `owner` is only set when link attribution is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub owner: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if `user_id` may read or delete this link.
    ///
    /// Unowned links are open to any signed-in user.
    pub fn is_accessible_by(&self, user_id: i64) -> bool {
        self.owner.is_none_or(|owner| owner == user_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
    pub owner: Option<i64>,
}
