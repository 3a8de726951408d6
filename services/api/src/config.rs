//! Service configuration from environment variables

use std::env;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: `0.0.0.0:3000`)
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        Self { bind_addr }
    }
}

/// Environment-configured admin override credentials.
///
/// When present these take precedence over the `admins` collection and are
/// compared by exact string equality. A known weak point kept for operational
/// parity; the database fallback path uses hashed verification instead.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    /// Present only when both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set
    pub fn from_env() -> Option<Self> {
        let email = env::var("ADMIN_EMAIL").ok()?;
        let password = env::var("ADMIN_PASSWORD").ok()?;
        Some(Self { email, password })
    }
}
