mod common;

use axum::http::StatusCode;
use linkcut::domain::repositories::UserRepository;
use serde_json::json;

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_url_by_owner() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/old", Some(user.id)).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "original_url": "https://example.com/new" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["original_url"], "https://example.com/new");
    assert_eq!(body["short_code"], "abc123");

    let link = common::find_link(&app, "abc123").await.unwrap();
    assert_eq!(link.original_url, "https://example.com/new");
}

#[tokio::test]
async fn test_update_short_code_marks_custom() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "short_code": "renamed" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["short_code"], "renamed");

    assert!(common::find_link(&app, "abc123").await.is_none());
    let link = common::find_link(&app, "renamed").await.unwrap();
    assert!(link.is_custom);
}

#[tokio::test]
async fn test_update_short_code_conflict() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/a", Some(user.id)).await;
    common::seed_link(&app, "taken1", "https://example.com/b", None).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "short_code": "taken1" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_to_own_code_is_noop() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "short_code": "abc123" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_update_invalid_short_code() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "short_code": "bad code!" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_clears_expiry_with_null() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link_with_expiry(
        &app,
        "abc123",
        "https://example.com/page",
        Some(user.id),
        Some(chrono::Utc::now() + chrono::Duration::hours(1)),
    )
    .await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "expires_at": null }))
        .await;

    response.assert_status_ok();

    let link = common::find_link(&app, "abc123").await.unwrap();
    assert!(link.expires_at.is_none());
}

#[tokio::test]
async fn test_update_absent_expiry_left_untouched() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link_with_expiry(
        &app,
        "abc123",
        "https://example.com/page",
        Some(user.id),
        Some(chrono::Utc::now() + chrono::Duration::hours(1)),
    )
    .await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "original_url": "https://example.com/new" }))
        .await;

    response.assert_status_ok();

    let link = common::find_link(&app, "abc123").await.unwrap();
    assert!(link.expires_at.is_some());
}

#[tokio::test]
async fn test_update_requires_token() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .json(&json!({ "original_url": "https://example.com/new" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_by_non_owner_forbidden() {
    let app = common::spawn();
    let alice = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_user(&app, "bob", "bob-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(alice.id)).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("bob-token")
        .json(&json!({ "original_url": "https://example.com/new" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_anonymous_link_forbidden() {
    let app = common::spawn();
    common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", None).await;

    let response = app
        .server
        .patch("/api/links/abc123")
        .authorization_bearer("alice-token")
        .json(&json!({ "original_url": "https://example.com/new" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_expired_link_gone() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_expired_link(&app, "stale1", "https://example.com/old", Some(user.id)).await;

    let response = app
        .server
        .patch("/api/links/stale1")
        .authorization_bearer("alice-token")
        .json(&json!({ "original_url": "https://example.com/new" }))
        .await;

    response.assert_status(StatusCode::GONE);
    assert!(common::find_link(&app, "stale1").await.is_none());
}

#[tokio::test]
async fn test_update_unknown_code_not_found() {
    let app = common::spawn();
    common::seed_user(&app, "alice", "alice-token").await;

    let response = app
        .server
        .patch("/api/links/nothere")
        .authorization_bearer("alice-token")
        .json(&json!({ "original_url": "https://example.com/new" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_by_owner() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    let response = app
        .server
        .delete("/api/links/abc123")
        .authorization_bearer("alice-token")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(common::find_link(&app, "abc123").await.is_none());
}

#[tokio::test]
async fn test_delete_twice_not_found() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    app.server
        .delete("/api/links/abc123")
        .authorization_bearer("alice-token")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = app
        .server
        .delete("/api/links/abc123")
        .authorization_bearer("alice-token")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_by_non_owner_forbidden() {
    let app = common::spawn();
    let alice = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_user(&app, "bob", "bob-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(alice.id)).await;

    let response = app
        .server
        .delete("/api/links/abc123")
        .authorization_bearer("bob-token")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(common::find_link(&app, "abc123").await.is_some());
}

#[tokio::test]
async fn test_delete_expired_link_allowed() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_expired_link(&app, "stale1", "https://example.com/old", Some(user.id)).await;

    let response = app
        .server
        .delete("/api/links/stale1")
        .authorization_bearer("alice-token")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_requires_token() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    let response = app.server.delete("/api/links/abc123").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_rejected() {
    let app = common::spawn();
    let user = common::seed_user(&app, "alice", "alice-token").await;
    app.users.set_active(user.id, false).await.unwrap();
    common::seed_link(&app, "abc123", "https://example.com/page", Some(user.id)).await;

    let response = app
        .server
        .delete("/api/links/abc123")
        .authorization_bearer("alice-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
