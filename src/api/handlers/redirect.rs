//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The click is recorded durably before the response is produced; an expired
/// link is lazily deleted and answered with 410 Gone.
///
/// # Errors
///
/// Returns 404 if the short code doesn't exist, 410 if it has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    Ok(Redirect::temporary(&link.original_url))
}
