//! Application state shared across handlers

use crate::{
    completion::CompletionClient,
    config::AdminCredentials,
    jwt::JwtService,
    rate_limiter::RateLimiter,
    repositories::{
        AdminRepository, ChatHistoryRepository, LeadRepository, ProjectRepository, UserRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub completion_client: CompletionClient,
    pub rate_limiter: RateLimiter,
    pub admin_credentials: Option<AdminCredentials>,
    pub user_repository: UserRepository,
    pub project_repository: ProjectRepository,
    pub lead_repository: LeadRepository,
    pub chat_repository: ChatHistoryRepository,
    pub admin_repository: AdminRepository,
}
