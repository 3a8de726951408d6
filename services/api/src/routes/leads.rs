//! Lead intake routes

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::ApiError,
    models::{Lead, LeadResponse, LeadStatus, Tier},
    state::AppState,
    validation::{is_email, is_non_empty, sanitize, sanitize_optional},
};

/// Request to create a lead from the contact or chat funnel.
///
/// Note there is no status or timestamp field: both are forced server-side.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub qualified: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListLeadsQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct LeadsResponse {
    pub leads: Vec<LeadResponse>,
}

/// Create a lead
pub async fn create_lead(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = payload.name.as_deref().unwrap_or("");
    let email = payload.email.as_deref().unwrap_or("");
    let tier_raw = payload.tier.as_deref().unwrap_or("");

    if !is_non_empty(name) || !is_email(email) || !is_non_empty(tier_raw) {
        return Err(ApiError::Validation(
            "Invalid input: name, email and tier are required".to_string(),
        ));
    }
    let tier: Tier = tier_raw.parse().map_err(ApiError::Validation)?;

    let lead = Lead::new(
        sanitize_optional(payload.user_id.as_deref()),
        sanitize(name),
        sanitize(email),
        sanitize_optional(payload.phone.as_deref()),
        tier,
        sanitize_optional(payload.requirements.as_deref()),
        payload.qualified.unwrap_or(false),
    );

    let lead_id = state.lead_repository.insert(lead).await.map_err(|e| {
        tracing::error!("Failed to create lead: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(json!({ "success": true, "leadId": lead_id.to_hex() })))
}

/// List leads, optionally filtered by status
pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<ListLeadsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(raw.parse::<LeadStatus>().map_err(ApiError::Validation)?),
        None => None,
    };

    let leads = state.lead_repository.list(status).await.map_err(|e| {
        tracing::error!("Failed to fetch leads: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(LeadsResponse {
        leads: leads.into_iter().map(LeadResponse::from).collect(),
    }))
}
