//! User authentication routes

use axum::{
    Json,
    extract::{ConnectInfo, State},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;

use crate::{
    error::ApiError,
    jwt::{Role, SESSION_COOKIE, expired_session_cookie, session_cookie},
    models::SafeUser,
    state::AppState,
    validation::{is_email, is_non_empty, sanitize, sanitize_optional},
};

use super::enforce_rate_limit;

/// Request for user signup
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// User signup endpoint: creates the account and issues the session cookie
pub async fn signup(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    enforce_rate_limit(&state, "signup", &addr).await?;

    let email = payload.email.as_deref().unwrap_or("");
    let password = payload.password.as_deref().unwrap_or("");
    let phone = payload.phone.as_deref().unwrap_or("");

    if !is_email(email) || !is_non_empty(password) || !is_non_empty(phone) {
        return Err(ApiError::Validation("Invalid input".to_string()));
    }

    let email = sanitize(email);
    let existing = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            tracing::error!("Signup lookup failed: {}", e);
            ApiError::InternalServerError
        })?;
    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let user = state
        .user_repository
        .create_account(
            email,
            sanitize_optional(payload.name.as_deref()),
            sanitize(phone),
            password,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {}", e);
            ApiError::InternalServerError
        })?;

    let safe = SafeUser::from(&user);
    let token = state
        .jwt_service
        .issue(&safe.id, &user.email, user.name.as_deref(), Role::User)
        .map_err(|e| {
            tracing::error!("Failed to issue session token: {}", e);
            ApiError::InternalServerError
        })?;

    let jar = jar.add(session_cookie(token, state.jwt_service.ttl_seconds()));
    Ok((jar, Json(json!({ "user": safe }))))
}

/// User login endpoint.
///
/// Unknown email and wrong password produce the identical 401 body, so a
/// caller cannot enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    enforce_rate_limit(&state, "login", &addr).await?;

    let email = payload.email.as_deref().unwrap_or("");
    let password = payload.password.as_deref().unwrap_or("");

    if !is_email(email) || !is_non_empty(password) {
        return Err(ApiError::Validation("Invalid input".to_string()));
    }

    let user = state
        .user_repository
        .find_by_email(&sanitize(email))
        .await
        .map_err(|e| {
            tracing::error!("Login lookup failed: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    if !state.user_repository.verify_password(&user, password) {
        return Err(ApiError::Unauthorized);
    }

    let safe = SafeUser::from(&user);
    let token = state
        .jwt_service
        .issue(&safe.id, &user.email, user.name.as_deref(), Role::User)
        .map_err(|e| {
            tracing::error!("Failed to issue session token: {}", e);
            ApiError::InternalServerError
        })?;

    let jar = jar.add(session_cookie(token, state.jwt_service.ttl_seconds()));
    Ok((jar, Json(json!({ "user": safe }))))
}

/// Logout endpoint: clears the session cookie unconditionally
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(expired_session_cookie());
    (jar, Json(json!({ "success": true })))
}

/// Current-identity lookup.
///
/// A missing, invalid, or expired session yields `{"user": null}` rather than
/// an error; the frontend treats that as "not signed in".
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let user = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.jwt_service.validate_token(cookie.value()).ok())
        .map(|claims| {
            json!({
                "_id": claims.sub,
                "email": claims.email,
                "name": claims.name,
                "role": claims.role,
            })
        });

    Json(json!({ "user": user }))
}
