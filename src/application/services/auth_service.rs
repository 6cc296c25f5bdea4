//! Bearer token authentication service.
//!
//! Tokens are opaque random strings handed out by the admin CLI. Only their
//! HMAC-SHA256 digest (keyed with the signing secret) is stored, so a leaked
//! database dump does not leak usable credentials.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded HMAC-SHA256 digest of an API token.
///
/// Shared between the HTTP auth path and the admin CLI so both sides derive
/// identical digests.
pub fn token_digest(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Resolves bearer tokens to users.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    signing_secret: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, signing_secret: String) -> Self {
        Self {
            users,
            signing_secret,
        }
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if no user matches the token digest
    /// or the matched user is deactivated.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let digest = token_digest(&self.signing_secret, token);

        let user = self
            .users
            .find_by_token_hash(&digest)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid API token", json!({})))?;

        if !user.is_active {
            return Err(AppError::unauthorized(
                "User account is deactivated",
                json!({ "username": user.username }),
            ));
        }

        Ok(user)
    }
}
