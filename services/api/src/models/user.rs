//! User model and related functionality
//!
//! The `users` collection holds two shapes of document: profiles synced from
//! the external identity provider (keyed by `supabaseId`, no password) and
//! accounts created through signup (password hash, no `supabaseId`). One
//! struct covers both; the optional fields tell them apart.

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::tier::Tier;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Argon2 hash; present only for signup accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// External identity subject; present only for synced profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    pub created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// User as returned by the profile endpoints; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supabase_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    pub created_at: ChronoDateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<ChronoDateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            name: user.name,
            phone: user.phone,
            supabase_id: user.supabase_id,
            tier: user.tier,
            created_at: user.created_at.to_chrono(),
            updated_at: user.updated_at.map(|dt| dt.to_chrono()),
        }
    }
}

/// Minimal identity descriptor embedded in auth responses and session claims
#[derive(Debug, Clone, Serialize)]
pub struct SafeUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&User> for SafeUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> User {
        User {
            id: Some(ObjectId::new()),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            phone: Some("+1555".to_string()),
            password: Some("$argon2id$stub".to_string()),
            supabase_id: None,
            tier: None,
            created_at: DateTime::now(),
            updated_at: None,
        }
    }

    #[test]
    fn user_response_never_includes_the_password_hash() {
        let response = UserResponse::from(account());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn safe_user_carries_identity_fields_only() {
        let user = account();
        let safe = SafeUser::from(&user);
        let json = serde_json::to_value(&safe).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["_id"], user.id.unwrap().to_hex());
    }
}
