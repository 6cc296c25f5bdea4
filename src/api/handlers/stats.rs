//! Handler for link usage statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns usage metadata for a short code.
///
/// # Endpoint
///
/// `GET /api/links/{code}/stats`
///
/// Shares the redirect path's expiry gate (an expired link is lazily deleted
/// and answered with 410) but does not count as a click.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.link_service.stats(&code).await?;

    Ok(Json(link.into()))
}
