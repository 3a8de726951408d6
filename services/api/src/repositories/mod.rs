//! Repositories for database operations
//!
//! One repository per collection. Each holds a typed collection handle and
//! performs single-document operations only; there is no multi-document
//! transaction anywhere in this service.

pub mod admins;
pub mod chat_history;
pub mod leads;
pub mod projects;
pub mod users;

pub use admins::AdminRepository;
pub use chat_history::ChatHistoryRepository;
pub use leads::LeadRepository;
pub use projects::ProjectRepository;
pub use users::UserRepository;
