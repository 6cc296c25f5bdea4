#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};

use linkcut::application::services::{AuthService, LinkService, token_digest};
use linkcut::domain::entities::{Link, NewLink, NewUser, User};
use linkcut::domain::repositories::{LinkRepository, UserRepository};
use linkcut::infrastructure::persistence::{MemoryLinkRepository, MemoryUserRepository};
use linkcut::routes::app_router;
use linkcut::state::AppState;
use linkcut::utils::code_generator::CodeGenerator;

pub const BASE_URL: &str = "https://s.test";
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// A fully wired application over in-memory stores, plus direct handles to
/// those stores for seeding and inspection.
pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<MemoryLinkRepository>,
    pub users: Arc<MemoryUserRepository>,
}

pub fn spawn() -> TestApp {
    let links = Arc::new(MemoryLinkRepository::new());
    let users = Arc::new(MemoryUserRepository::new());

    let generator = Arc::new(CodeGenerator::seeded(6, 42));
    let link_service = Arc::new(LinkService::new(
        links.clone(),
        generator,
        BASE_URL.to_string(),
    ));
    let auth_service = Arc::new(AuthService::new(users.clone(), SIGNING_SECRET.to_string()));

    let state = AppState::new(link_service, auth_service);
    let server = TestServer::new(app_router(state)).expect("failed to start test server");

    TestApp {
        server,
        links,
        users,
    }
}

/// Registers a user whose API token is exactly `token`.
pub async fn seed_user(app: &TestApp, username: &str, token: &str) -> User {
    app.users
        .insert(NewUser {
            email: format!("{username}@example.com"),
            username: username.to_string(),
            api_token_hash: token_digest(SIGNING_SECRET, token),
        })
        .await
        .unwrap()
}

pub async fn seed_link(app: &TestApp, code: &str, url: &str, owner_id: Option<i64>) -> Link {
    seed_link_with_expiry(app, code, url, owner_id, None).await
}

pub async fn seed_expired_link(app: &TestApp, code: &str, url: &str, owner_id: Option<i64>) -> Link {
    seed_link_with_expiry(
        app,
        code,
        url,
        owner_id,
        Some(Utc::now() - Duration::hours(1)),
    )
    .await
}

pub async fn seed_link_with_expiry(
    app: &TestApp,
    code: &str,
    url: &str,
    owner_id: Option<i64>,
    expires_at: Option<DateTime<Utc>>,
) -> Link {
    app.links
        .insert(NewLink {
            original_url: url.to_string(),
            short_code: code.to_string(),
            owner_id,
            expires_at,
            is_custom: false,
        })
        .await
        .unwrap()
}

/// Fetches a link straight from the store, bypassing the HTTP layer.
pub async fn find_link(app: &TestApp, code: &str) -> Option<Link> {
    app.links.find_by_code(code).await.unwrap()
}
