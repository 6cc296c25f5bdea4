//! Bearer token authentication middleware.
//!
//! Two variants cover the API surface:
//!
//! - [`required`] — update/delete routes; 401 without a valid token
//! - [`optional`] — creation route; anonymous requests pass through, but a
//!   presented token must still be valid
//!
//! # Header Format
//!
//! ```text
//! Authorization: Bearer <token>
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// The authenticated caller, inserted into request extensions by [`required`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The caller's optional identity, inserted by [`optional`].
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

/// Requires a valid bearer token; resolves it to a [`CurrentUser`].
///
/// # Errors
///
/// Returns 401 if the Authorization header is missing or malformed, the
/// token is unknown, or the user is deactivated.
pub async fn required(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Resolves a bearer token when one is presented; anonymous otherwise.
///
/// A missing header yields `MaybeUser(None)`. A header that is present but
/// invalid is still a 401; bad credentials are never downgraded to anonymous.
pub async fn optional(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let identity = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(st.auth_service.authenticate(&token).await?),
        Err(_) => None,
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(MaybeUser(identity));

    Ok(next.run(req).await)
}
