//! DTOs for link creation and management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::pagination::PaginationMeta;
use crate::domain::entities::Link;

/// Request to shorten a URL.
///
/// URL shape and custom code rules are enforced by the link service so that
/// rejections carry a specific reason.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination, with or without a scheme.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom short code.
    #[serde(default)]
    pub custom_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code,
            short_url,
            original_url: link.original_url,
            click_count: link.click_count,
            created_at: link.created_at,
        }
    }
}

/// Paginated list of links, newest first.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkResponse>,
}
