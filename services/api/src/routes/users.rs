//! User profile routes
//!
//! Profiles are synced from the external identity provider and keyed by its
//! subject id; the upsert is atomic find-or-create-then-update.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::ApiError,
    models::{Tier, UserResponse},
    state::AppState,
    validation::{is_email, is_non_empty, sanitize, sanitize_optional},
};

/// Request to upsert a synced profile
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub supabase_id: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserQuery {
    #[serde(default)]
    pub supabase_id: Option<String>,
}

/// Upsert a profile keyed by the external identity subject.
///
/// `userId` in the response is the generated id on insert and null on update.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(payload): Json<UpsertUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supabase_id = payload.supabase_id.as_deref().unwrap_or("");
    let email = payload.email.as_deref().unwrap_or("");

    if !is_non_empty(supabase_id) || !is_email(email) {
        return Err(ApiError::Validation(
            "Invalid input: supabaseId and valid email are required".to_string(),
        ));
    }

    let tier = match sanitize_optional(payload.tier.as_deref()) {
        Some(raw) => Some(raw.parse::<Tier>().map_err(ApiError::Validation)?),
        None => None,
    };

    let user_id = state
        .user_repository
        .upsert_profile(
            &sanitize(supabase_id),
            &sanitize(email),
            sanitize_optional(payload.name.as_deref()),
            tier,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to save user: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({
        "success": true,
        "userId": user_id.map(|id| id.to_hex()),
    })))
}

/// Fetch a profile by the external identity subject
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<GetUserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let supabase_id = query
        .supabase_id
        .as_deref()
        .filter(|id| is_non_empty(id))
        .ok_or_else(|| ApiError::Validation("Missing supabaseId".to_string()))?;

    let user = state
        .user_repository
        .find_by_supabase_id(&sanitize(supabase_id))
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "user": user.map(UserResponse::from) })))
}
