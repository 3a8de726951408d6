//! Project intake routes

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::ApiError,
    models::{Project, ProjectResponse, Tier},
    state::AppState,
    validation::{is_non_empty, sanitize, sanitize_optional},
};

/// Request to create a project
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectResponse>,
}

/// Create a project
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let title = payload.title.as_deref().unwrap_or("");
    let description = payload.description.as_deref().unwrap_or("");

    if !is_non_empty(title) || !is_non_empty(description) {
        return Err(ApiError::Validation(
            "Invalid input: title and description are required".to_string(),
        ));
    }

    let tier = match sanitize_optional(payload.tier.as_deref()) {
        Some(raw) => Some(raw.parse::<Tier>().map_err(ApiError::Validation)?),
        None => None,
    };

    let project = Project::new(
        sanitize_optional(payload.user_id.as_deref()),
        sanitize(title),
        sanitize(description),
        tier,
        sanitize_optional(payload.budget.as_deref()),
    );

    let project_id = state.project_repository.insert(project).await.map_err(|e| {
        tracing::error!("Failed to create project: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(
        json!({ "success": true, "projectId": project_id.to_hex() }),
    ))
}

/// List projects owned by a user
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query
        .user_id
        .as_deref()
        .filter(|id| is_non_empty(id))
        .ok_or_else(|| ApiError::Validation("Missing userId".to_string()))?;

    let projects = state
        .project_repository
        .list_by_user(&sanitize(user_id))
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch projects: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(ProjectsResponse {
        projects: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}
