//! DTO for the link update endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::serde_as;
use validator::Validate;

use crate::api::dto::shorten::ALIAS_REGEX;
use crate::domain::entities::LinkUpdate;

/// Request body for `PATCH /api/links/{code}`.
///
/// All fields are optional — only provided fields are changed.
///
/// # `expires_at` semantics
///
/// - **Absent** (`expires_at` not in JSON) → leave existing value unchanged
/// - **`null`** → clear expiry (link never expires)
/// - **Timestamp** → set new expiry
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New destination URL for this link.
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: Option<String>,

    /// New short code. Marks the link as custom.
    #[validate(regex(
        path = "*ALIAS_REGEX",
        message = "Alias can only contain letters, digits, hyphens, and underscores"
    ))]
    pub short_code: Option<String>,

    /// Expiry timestamp. Absent = no change, null = clear, value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateLinkRequest> for LinkUpdate {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkUpdate {
            original_url: req.original_url,
            short_code: req.short_code,
            expires_at: req.expires_at,
        }
    }
}
