//! Session middleware for admin-only routes

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::ApiError,
    jwt::{Role, SESSION_COOKIE},
    state::AppState,
};

/// Require a valid admin session cookie.
///
/// Validates the signed session token and checks the role claim; the claims
/// are inserted into request extensions for downstream handlers.
pub async fn admin_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let claims = state
        .jwt_service
        .validate_token(&token)
        .map_err(|_| ApiError::Unauthorized)?;

    if claims.role != Role::Admin {
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
