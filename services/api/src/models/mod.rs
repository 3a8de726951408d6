//! Domain models for the DevAgency API

pub mod admin;
pub mod chat;
pub mod lead;
pub mod project;
pub mod tier;
pub mod user;

// Re-export for convenience
pub use admin::Admin;
pub use chat::{ChatMessage, ChatMessageResponse, ChatRole};
pub use lead::{Lead, LeadResponse, LeadStatus};
pub use project::{Project, ProjectResponse, ProjectStatus};
pub use tier::Tier;
pub use user::{SafeUser, User, UserResponse};
