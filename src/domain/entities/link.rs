//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with ownership and usage metadata.
///
/// `short_code` is identity-equivalent once assigned but can be re-assigned
/// through an explicit update. `clicks` only ever increases and is bumped
/// solely by the usage recorder on a successful redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    /// Owning user, if the link was created by an authenticated caller.
    pub owner_id: Option<i64>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    /// Absence means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// `true` for caller-chosen aliases, `false` for generated codes.
    pub is_custom: bool,
}

impl Link {
    /// Returns true iff the link has an expiry strictly in the past.
    ///
    /// A link with no `expires_at` is never expired, and `now == expires_at`
    /// is still within the link's lifetime.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }
}

/// Input data for creating a new link.
///
/// `id`, `clicks`, and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub owner_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_custom: bool,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
/// `expires_at: Some(None)` clears the expiry; `Some(Some(t))` sets it.
#[derive(Debug, Clone, Default)]
pub struct LinkUpdate {
    pub original_url: Option<String>,
    pub short_code: Option<String>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}
