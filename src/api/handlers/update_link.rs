//! Handler for the link update endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::{LinkResponse, UpdateLinkRequest};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Partially updates a link owned by the caller.
///
/// # Endpoint
///
/// `PATCH /api/links/{code}` (bearer token required)
///
/// # Errors
///
/// Returns 404 for an unknown code, 403 when the caller is not the owner,
/// 410 for an expired link (lazily deleted), 400 for invalid fields, and
/// 409 when the new short code is taken by another link.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_link(&code, &caller, payload.into())
        .await?;

    let short_url = state.link_service.short_url(&link.short_code);

    Ok(Json(LinkResponse::from_link(&link, short_url)))
}
