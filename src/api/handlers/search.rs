//! Handler for searching links by destination URL.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::{LinkResponse, SearchQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Finds non-expired links whose destination URL contains the search term.
///
/// # Endpoint
///
/// `GET /api/links/search?original_url=<term>`
pub async fn search_handler(
    Query(query): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.search_links(&query.original_url).await?;

    let responses = links
        .iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.short_code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(responses))
}
