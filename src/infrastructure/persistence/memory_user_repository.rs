//! In-memory implementation of the user repository.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    users: HashMap<i64, User>,
    token_hashes: HashMap<String, i64>,
}

/// In-memory user store, used by integration tests.
#[derive(Default)]
pub struct MemoryUserRepository {
    inner: RwLock<Store>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut store = self.inner.write().expect("user store lock poisoned");

        let taken = store.token_hashes.contains_key(&new_user.api_token_hash)
            || store
                .users
                .values()
                .any(|u| u.email == new_user.email || u.username == new_user.username);
        if taken {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users" }),
            ));
        }

        store.next_id += 1;
        let user = User {
            id: store.next_id,
            email: new_user.email,
            username: new_user.username,
            is_active: true,
        };
        store.users.insert(user.id, user.clone());
        store.token_hashes.insert(new_user.api_token_hash, user.id);

        Ok(user)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let store = self.inner.read().expect("user store lock poisoned");

        Ok(store
            .token_hashes
            .get(token_hash)
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let store = self.inner.read().expect("user store lock poisoned");

        Ok(store
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let store = self.inner.read().expect("user store lock poisoned");

        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);

        Ok(users)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<bool, AppError> {
        let mut store = self.inner.write().expect("user store lock poisoned");

        match store.users.get_mut(&id) {
            Some(user) => {
                user.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
