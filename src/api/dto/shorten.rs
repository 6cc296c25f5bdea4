//! DTOs for link creation and listing.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Compiled regex for custom alias validation.
pub static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Request body for `POST /api/links/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional caller-chosen short code.
    #[validate(regex(
        path = "*ALIAS_REGEX",
        message = "Alias can only contain letters, digits, hyphens, and underscores"
    ))]
    pub custom_alias: Option<String>,

    /// Optional expiry timestamp. After this time, the link returns 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,
}

/// A created or listed link, with its full short URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
}

impl LinkResponse {
    pub fn from_link(link: &Link, short_url: String) -> Self {
        Self {
            original_url: link.original_url.clone(),
            short_code: link.short_code.clone(),
            short_url,
        }
    }
}
