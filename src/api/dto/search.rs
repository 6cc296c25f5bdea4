//! DTO for the link search endpoint.

use serde::Deserialize;

/// Query parameters for `GET /api/links/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Substring to match against stored destination URLs.
    pub original_url: String,
}
