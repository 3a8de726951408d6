//! Admin routes: login and dashboard stats

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
    jwt::{Role, session_cookie},
    models::LeadStatus,
    state::AppState,
    validation::{is_non_empty, sanitize},
};

use super::enforce_rate_limit;

/// Request for admin login
#[derive(Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Admin login endpoint.
///
/// Environment-configured credentials take precedence and are compared by
/// exact string equality. Otherwise the `admins` collection is consulted and
/// the stored argon2 hash is verified. Every failure path returns the same
/// generic 401. Success issues the same signed session cookie as user login,
/// with the admin role claim.
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    enforce_rate_limit(&state, "admin-login", &addr).await?;

    let email = payload.email.as_deref().unwrap_or("");
    let password = payload.password.as_deref().unwrap_or("");

    if !is_non_empty(email) || !is_non_empty(password) {
        return Err(ApiError::Validation(
            "Email and password required".to_string(),
        ));
    }

    if let Some(credentials) = &state.admin_credentials {
        if sanitize(email) != credentials.email || sanitize(password) != credentials.password {
            return Err(ApiError::Unauthorized);
        }

        let token = state
            .jwt_service
            .issue(&credentials.email, &credentials.email, None, Role::Admin)
            .map_err(|e| {
                tracing::error!("Failed to issue admin session token: {}", e);
                ApiError::InternalServerError
            })?;

        let jar = jar.add(session_cookie(token, state.jwt_service.ttl_seconds()));
        return Ok((
            jar,
            Json(json!({ "admin": { "email": credentials.email, "role": "admin" } })),
        ));
    }

    let admin = state
        .admin_repository
        .find_by_email(&sanitize(email))
        .await
        .map_err(|e| {
            tracing::error!("Admin lookup failed: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    if !state.admin_repository.verify_password(&admin, password) {
        return Err(ApiError::Unauthorized);
    }

    let sub = admin
        .id
        .map(|id| id.to_hex())
        .unwrap_or_else(|| admin.email.clone());
    let token = state
        .jwt_service
        .issue(&sub, &admin.email, None, Role::Admin)
        .map_err(|e| {
            tracing::error!("Failed to issue admin session token: {}", e);
            ApiError::InternalServerError
        })?;

    let jar = jar.add(session_cookie(token, state.jwt_service.ttl_seconds()));
    Ok((
        jar,
        Json(json!({ "admin": { "email": admin.email, "role": admin.role } })),
    ))
}

/// Dashboard stats: document counts per collection plus unworked leads.
/// Guarded by the admin-session middleware.
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let total_users = state.user_repository.count().await.map_err(|e| {
        tracing::error!("Failed to count users: {}", e);
        ApiError::InternalServerError
    })?;
    let total_projects = state.project_repository.count().await.map_err(|e| {
        tracing::error!("Failed to count projects: {}", e);
        ApiError::InternalServerError
    })?;
    let total_leads = state.lead_repository.count(None).await.map_err(|e| {
        tracing::error!("Failed to count leads: {}", e);
        ApiError::InternalServerError
    })?;
    let new_leads = state
        .lead_repository
        .count(Some(LeadStatus::New))
        .await
        .map_err(|e| {
            tracing::error!("Failed to count new leads: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({
        "totalUsers": total_users,
        "totalProjects": total_projects,
        "totalLeads": total_leads,
        "newLeads": new_leads,
    })))
}
