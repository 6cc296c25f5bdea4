//! In-memory implementation of the link repository.
//!
//! Backs integration tests and local experimentation. All mutations happen
//! under a single write lock, which gives the same atomic check-then-insert
//! guarantee the PostgreSQL unique constraint provides.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    links: HashMap<i64, Link>,
}

impl Store {
    fn code_taken(&self, code: &str, exclude_id: Option<i64>) -> bool {
        self.links
            .values()
            .any(|l| l.short_code == code && Some(l.id) != exclude_id)
    }
}

/// In-memory link store keyed by id, with a uniqueness scan over short codes.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Store>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.inner.write().expect("link store lock poisoned");

        if store.code_taken(&new_link.short_code, None) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        store.next_id += 1;
        let link = Link {
            id: store.next_id,
            original_url: new_link.original_url,
            short_code: new_link.short_code,
            owner_id: new_link.owner_id,
            clicks: 0,
            created_at: Utc::now(),
            last_used_at: None,
            expires_at: new_link.expires_at,
            is_custom: new_link.is_custom,
        };
        store.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let store = self.inner.read().expect("link store lock poisoned");

        Ok(store
            .links
            .values()
            .find(|l| l.short_code == code)
            .cloned())
    }

    async fn update(&self, link: &Link) -> Result<Link, AppError> {
        let mut store = self.inner.write().expect("link store lock poisoned");

        if store.code_taken(&link.short_code, Some(link.id)) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        match store.links.get_mut(&link.id) {
            Some(stored) => {
                stored.original_url = link.original_url.clone();
                stored.short_code = link.short_code.clone();
                stored.expires_at = link.expires_at;
                stored.is_custom = link.is_custom;
                Ok(stored.clone())
            }
            None => Err(AppError::not_found(
                "Short link not found",
                json!({ "id": link.id }),
            )),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.inner.write().expect("link store lock poisoned");

        Ok(store.links.remove(&id).is_some())
    }

    async fn record_usage(&self, id: i64, now: DateTime<Utc>) -> Result<(), AppError> {
        let mut store = self.inner.write().expect("link store lock poisoned");

        if let Some(link) = store.links.get_mut(&id) {
            link.clicks += 1;
            link.last_used_at = Some(now);
        }

        Ok(())
    }

    async fn search_by_url(
        &self,
        fragment: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Link>, AppError> {
        let store = self.inner.read().expect("link store lock poisoned");

        let fragment = fragment.to_lowercase();
        let mut matches: Vec<Link> = store
            .links
            .values()
            .filter(|l| l.original_url.to_lowercase().contains(&fragment) && !l.is_expired(now))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink {
            original_url: url.to_string(),
            short_code: code.to_string(),
            owner_id: None,
            expires_at: None,
            is_custom: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .insert(new_link("abc123", "https://example.com"))
            .await
            .unwrap();

        assert_eq!(link.clicks, 0);
        assert!(link.last_used_at.is_none());

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found, link);
    }

    #[tokio::test]
    async fn test_insert_duplicate_code_conflicts() {
        let repo = MemoryLinkRepository::new();

        repo.insert(new_link("dup", "https://a.example")).await.unwrap();
        let result = repo.insert(new_link("dup", "https://b.example")).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .insert(new_link("gone", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete(link.id).await.unwrap());
        assert!(!repo.delete(link.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_record_usage_increments_clicks() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .insert(new_link("clicky", "https://example.com"))
            .await
            .unwrap();

        let now = Utc::now();
        repo.record_usage(link.id, now).await.unwrap();

        let found = repo.find_by_code("clicky").await.unwrap().unwrap();
        assert_eq!(found.clicks, 1);
        assert_eq!(found.last_used_at, Some(now));
    }

    #[tokio::test]
    async fn test_update_rejects_code_taken_by_other_link() {
        let repo = MemoryLinkRepository::new();

        repo.insert(new_link("first", "https://a.example")).await.unwrap();
        let mut second = repo
            .insert(new_link("second", "https://b.example"))
            .await
            .unwrap();

        second.short_code = "first".to_string();
        let result = repo.update(&second).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_allows_keeping_own_code() {
        let repo = MemoryLinkRepository::new();

        let mut link = repo
            .insert(new_link("keep", "https://a.example"))
            .await
            .unwrap();
        link.original_url = "https://b.example".to_string();

        let updated = repo.update(&link).await.unwrap();
        assert_eq!(updated.original_url, "https://b.example");
        assert_eq!(updated.short_code, "keep");
    }

    #[tokio::test]
    async fn test_search_excludes_expired() {
        let repo = MemoryLinkRepository::new();
        let now = Utc::now();

        repo.insert(new_link("live", "https://example.com/live"))
            .await
            .unwrap();
        repo.insert(NewLink {
            expires_at: Some(now - Duration::hours(1)),
            ..new_link("dead", "https://example.com/dead")
        })
        .await
        .unwrap();

        let results = repo.search_by_url("example.com", now).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].short_code, "live");
    }
}
