//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`                 - Short link redirect (public)
//! - `GET  /health`                 - Health check (public)
//! - `POST /api/links/shorten`      - Create link (bearer token optional)
//! - `GET  /api/links/search`       - Search links (public)
//! - `GET  /api/links/{code}/stats` - Link statistics (public)
//! - `PATCH/DELETE /api/links/{code}` - Mutations (bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Authentication** - bearer token, per route group

use axum::routing::get;
use axum::{Router, middleware};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = Router::new()
        .merge(
            api::routes::shorten_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::optional)),
        )
        .merge(
            api::routes::owner_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::required)),
        )
        .merge(api::routes::public_routes());

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
