//! HTTP routes for the DevAgency API

pub mod admin;
pub mod auth;
pub mod chat;
pub mod leads;
pub mod projects;
pub mod users;

use axum::{
    Json, Router,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use std::net::SocketAddr;

use crate::{error::ApiError, middleware::admin_auth, state::AppState};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/stats", get(admin::stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/leads", post(leads::create_lead).get(leads::list_leads))
        .route(
            "/api/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route("/api/users", post(users::upsert_user).get(users::get_user))
        .route(
            "/api/chat-history",
            post(chat::append_message).get(chat::list_messages),
        )
        .route("/api/chat", post(chat::chat))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/admin/login", post(admin::login))
        .merge(admin_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "devagency-api"
    }))
}

/// Record an attempt against the per-IP limiter for one endpoint scope
pub(crate) async fn enforce_rate_limit(
    state: &AppState,
    scope: &str,
    addr: &SocketAddr,
) -> Result<(), ApiError> {
    let key = format!("{scope}:{}", addr.ip());
    if state.rate_limiter.is_allowed(&key).await {
        Ok(())
    } else {
        Err(ApiError::TooManyRequests)
    }
}
