//! Handler for the link creation endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::{LinkResponse, ShortenRequest};
use crate::api::middleware::auth::MaybeUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/links/shorten` (bearer token optional — authenticated callers
/// become the link's owner, anonymous links have none)
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/very/long/path",
///   "custom_alias": "My-Link1",             // optional
///   "expires_at": "2030-01-01T00:00:00Z"    // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 for an invalid URL or alias, 409 when the alias is taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(MaybeUser(caller)): Extension<MaybeUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(
            payload.original_url,
            payload.custom_alias,
            payload.expires_at,
            caller.map(|user| user.id),
        )
        .await?;

    let short_url = state.link_service.short_url(&link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(&link, short_url)),
    ))
}
