//! API route groups.
//!
//! Routes are grouped by authentication requirement; the top-level router in
//! [`crate::routes`] attaches the matching auth middleware to each group.

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::api::handlers::{
    delete_link_handler, search_handler, shorten_handler, stats_handler, update_link_handler,
};
use crate::state::AppState;

/// Routes reachable without credentials.
///
/// - `GET /links/search`        - Find links by destination URL
/// - `GET /links/{code}/stats`  - Usage metadata for a link
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/links/search", get(search_handler))
        .route("/links/{code}/stats", get(stats_handler))
}

/// Link creation, with optional caller identity.
///
/// - `POST /links/shorten` - Create a short link (owner set when authenticated)
pub fn shorten_routes() -> Router<AppState> {
    Router::new().route("/links/shorten", post(shorten_handler))
}

/// Mutation routes requiring an authenticated owner.
///
/// - `PATCH  /links/{code}` - Partially update a link
/// - `DELETE /links/{code}` - Delete a link
pub fn owner_routes() -> Router<AppState> {
    Router::new().route(
        "/links/{code}",
        patch(update_link_handler).delete(delete_link_handler),
    )
}
