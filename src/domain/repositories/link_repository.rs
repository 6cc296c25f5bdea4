//! Repository trait for short link data access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;

/// Durable store of links, keyed by short code.
///
/// The store is the sole shared mutable resource and the authoritative guard
/// for short-code uniqueness: `insert` and `update` must enforce it
/// atomically (check-then-insert), so application-level pre-checks remain an
/// optimization only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL,
///   uniqueness via a `UNIQUE` constraint
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-memory,
///   uniqueness under a write lock; used by integration tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link, assigning `id`, `created_at`, and a zero click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already present.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Persists the mutable fields of `link` (URL, code, expiry, custom flag).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new short code collides with
    /// another link. Returns [`AppError::NotFound`] if the link no longer
    /// exists. Returns [`AppError::Internal`] on database errors.
    async fn update(&self, link: &Link) -> Result<Link, AppError>;

    /// Deletes a link by id. Idempotent: deleting a missing record is not an
    /// error.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if it was
    /// already gone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Records one successful redirect: increments `clicks` by 1 and sets
    /// `last_used_at` to `now`, atomically in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_usage(&self, id: i64, now: DateTime<Utc>) -> Result<(), AppError>;

    /// Finds non-expired links whose original URL contains `fragment`.
    ///
    /// Expiry is evaluated against the supplied `now`, with the same strict
    /// semantics as [`Link::is_expired`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search_by_url(
        &self,
        fragment: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Link>, AppError>;
}
