//! Project model and related functionality

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tier::Tier;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown project status: {other}")),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Project {
    /// Build a project for insertion; starts `pending` with both timestamps
    /// stamped server-side.
    pub fn new(
        user_id: Option<String>,
        title: String,
        description: String,
        tier: Option<Tier>,
        budget: Option<String>,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            title,
            description,
            tier,
            budget,
            status: ProjectStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Project as returned to API callers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub status: ProjectStatus,
    pub created_at: ChronoDateTime<Utc>,
    pub updated_at: ChronoDateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: project.user_id,
            title: project.title,
            description: project.description,
            tier: project.tier,
            budget: project.budget,
            status: project.status,
            created_at: project.created_at.to_chrono(),
            updated_at: project.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_starts_pending() {
        let project = Project::new(
            Some("u-1".to_string()),
            "Site".to_string(),
            "Marketing site".to_string(),
            Some(Tier::Medium),
            None,
        );
        assert_eq!(project.status, ProjectStatus::Pending);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn project_status_round_trips_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            "in_progress".parse::<ProjectStatus>(),
            Ok(ProjectStatus::InProgress)
        );
        assert!("paused".parse::<ProjectStatus>().is_err());
    }
}
