//! DTO for the link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Usage metadata for a link, returned by `GET /api/links/{code}/stats`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub last_used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Link> for StatsResponse {
    fn from(link: Link) -> Self {
        Self {
            original_url: link.original_url,
            short_code: link.short_code,
            created_at: link.created_at,
            clicks: link.clicks,
            last_used_at: link.last_used_at,
            expires_at: link.expires_at,
        }
    }
}
