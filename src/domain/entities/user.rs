//! User entity for link ownership and API authentication.

/// An API user.
///
/// Users authenticate with a bearer token whose HMAC digest is stored next
/// to the account. Links optionally reference their creating user through
/// `Link::owner_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Deactivated users keep their links but can no longer authenticate.
    pub is_active: bool,
}

/// Input data for registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    /// HMAC-SHA256 digest of the user's API token. Raw tokens are never stored.
    pub api_token_hash: String,
}
