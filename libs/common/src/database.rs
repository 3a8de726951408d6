//! Database module for handling MongoDB connections and operations
//!
//! This module provides client construction, configuration, and health checks
//! for the MongoDB document store. The client is built once at process start
//! and injected into the services that need it; shut it down explicitly with
//! [`mongodb::Client::shutdown`] when the process terminates.

use crate::error::{DatabaseError, DatabaseResult};
use mongodb::{Client, Database, bson::doc};
use std::env;

/// Logical to physical collection names, fixed across the application.
pub mod collections {
    pub const USERS: &str = "users";
    pub const PROJECTS: &str = "projects";
    pub const LEADS: &str = "leads";
    pub const CHAT_HISTORY: &str = "chat_history";
    pub const ADMINS: &str = "admins";
}

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Name of the application database
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "devagency".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MONGODB_URI`: connection URI (default: `mongodb://localhost:27017`)
    /// - `MONGODB_DATABASE`: database name (default: `devagency`)
    pub fn from_env() -> DatabaseResult<Self> {
        let defaults = Self::default();

        let uri = env::var("MONGODB_URI").unwrap_or(defaults.uri);
        let database = env::var("MONGODB_DATABASE").unwrap_or(defaults.database);

        if database.trim().is_empty() {
            return Err(DatabaseError::Configuration(
                "MONGODB_DATABASE must not be empty".to_string(),
            ));
        }

        Ok(Self { uri, database })
    }
}

/// Initialize a MongoDB client
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<Client>` - MongoDB client or error
pub async fn init_client(config: &DatabaseConfig) -> DatabaseResult<Client> {
    let client = Client::with_uri_str(&config.uri)
        .await
        .map_err(DatabaseError::Connection)?;

    Ok(client)
}

/// Get a handle to the application database
pub fn database(client: &Client, config: &DatabaseConfig) -> Database {
    client.database(&config.database)
}

/// Check database connectivity
///
/// # Arguments
///
/// * `db` - Database handle
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if the server answers a ping, error otherwise
pub async fn health_check(db: &Database) -> DatabaseResult<bool> {
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(DatabaseError::Command)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "devagency");
    }

    #[test]
    fn test_collection_names_are_fixed() {
        assert_eq!(collections::USERS, "users");
        assert_eq!(collections::PROJECTS, "projects");
        assert_eq!(collections::LEADS, "leads");
        assert_eq!(collections::CHAT_HISTORY, "chat_history");
        assert_eq!(collections::ADMINS, "admins");
    }
}
