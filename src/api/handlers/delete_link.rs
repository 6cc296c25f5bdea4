//! Handler for the link deletion endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a link owned by the caller.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}` (bearer token required)
///
/// Deletion is unconditional for the owner — there is no expiry gate on
/// this path.
///
/// # Errors
///
/// Returns 404 for an unknown code, 403 when the caller is not the owner.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code, &caller).await?;

    Ok(StatusCode::NO_CONTENT)
}
