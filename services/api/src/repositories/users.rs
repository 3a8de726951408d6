//! User repository for database operations

use anyhow::{Context, Result};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use mongodb::{
    Collection, Database,
    bson::{Bson, DateTime, doc, oid::ObjectId},
};
use tracing::info;

use common::database::collections;

use crate::models::{Tier, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(collections::USERS),
        }
    }

    /// Upsert a profile keyed by the external identity subject.
    ///
    /// Atomic find-or-create-then-update: `createdAt` is written only on
    /// insert, `email`/`name`/`tier`/`updatedAt` always. Returns the generated
    /// id when a new document was created, `None` when an existing one was
    /// updated (callers needing the id after an update must re-fetch).
    pub async fn upsert_profile(
        &self,
        supabase_id: &str,
        email: &str,
        name: Option<String>,
        tier: Option<Tier>,
    ) -> Result<Option<ObjectId>> {
        info!("Upserting user profile for subject {}", supabase_id);

        let update = doc! {
            "$set": {
                "email": email,
                "name": name.map(Bson::String).unwrap_or(Bson::Null),
                "tier": tier.map(|t| Bson::String(t.to_string())).unwrap_or(Bson::Null),
                "updatedAt": DateTime::now(),
            },
            "$setOnInsert": { "createdAt": DateTime::now() },
        };

        let result = self
            .collection
            .update_one(doc! { "supabaseId": supabase_id }, update)
            .upsert(true)
            .await?;

        Ok(result.upserted_id.and_then(|id| id.as_object_id()))
    }

    /// Find a profile by its external identity subject
    pub async fn find_by_supabase_id(&self, supabase_id: &str) -> Result<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "supabaseId": supabase_id })
            .await?)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    /// Create a signup account, storing a salted argon2 hash of the password
    pub async fn create_account(
        &self,
        email: String,
        name: Option<String>,
        phone: String,
        password: &str,
    ) -> Result<User> {
        info!("Creating account for {}", email);

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        let mut user = User {
            id: None,
            email,
            name,
            phone: Some(phone),
            password: Some(password_hash),
            supabase_id: None,
            tier: None,
            created_at: DateTime::now(),
            updated_at: None,
        };

        let result = self.collection.insert_one(&user).await?;
        user.id = Some(
            result
                .inserted_id
                .as_object_id()
                .context("inserted user id was not an ObjectId")?,
        );

        Ok(user)
    }

    /// Verify a password against the stored hash.
    ///
    /// Accounts without a password field (synced profiles) and unparseable
    /// stored hashes both count as a mismatch, so every failure looks the same
    /// to the caller.
    pub fn verify_password(&self, user: &User, password: &str) -> bool {
        let Some(stored) = user.password.as_deref() else {
            return false;
        };
        let Ok(parsed_hash) = PasswordHash::new(stored) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Count all users
    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;

    fn user_with_password(password: Option<String>) -> User {
        User {
            id: None,
            email: "ada@example.com".to_string(),
            name: None,
            phone: None,
            password,
            supabase_id: None,
            tier: None,
            created_at: DateTime::now(),
            updated_at: None,
        }
    }

    // Client construction is lazy, so a repository handle works without a
    // running server as long as no operation is issued.
    async fn offline_repository() -> UserRepository {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .expect("parse test URI");
        UserRepository::new(&client.database("devagency_test"))
    }

    #[tokio::test]
    async fn verify_password_round_trip() {
        let repository = offline_repository().await;

        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(b"hunter2!", &salt)
            .unwrap()
            .to_string();

        let user = user_with_password(Some(hash));
        assert!(repository.verify_password(&user, "hunter2!"));
        assert!(!repository.verify_password(&user, "wrong"));
    }

    #[tokio::test]
    async fn verify_password_treats_missing_or_garbled_hash_as_mismatch() {
        let repository = offline_repository().await;

        let no_password = user_with_password(None);
        assert!(!repository.verify_password(&no_password, "anything"));

        let garbled = user_with_password(Some("not-a-phc-string".to_string()));
        assert!(!repository.verify_password(&garbled, "anything"));
    }

    #[tokio::test]
    #[serial]
    async fn upsert_is_keyed_and_last_write_wins() -> Result<()> {
        let Ok(uri) = std::env::var("MONGODB_URI") else {
            eprintln!("MONGODB_URI not set, skipping user repository test");
            return Ok(());
        };
        let client = mongodb::Client::with_uri_str(&uri).await?;
        let db = client.database("devagency_test");
        db.collection::<User>(collections::USERS).drop().await.ok();
        let repository = UserRepository::new(&db);

        let first = repository
            .upsert_profile("sub-1", "old@example.com", Some("Ada".to_string()), None)
            .await?;
        assert!(first.is_some(), "insert should return the generated id");

        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = repository
            .upsert_profile("sub-1", "new@example.com", Some("Ada".to_string()), None)
            .await?;
        assert!(second.is_none(), "update should not return an id");

        assert_eq!(repository.count().await?, 1);

        let user = repository
            .find_by_supabase_id("sub-1")
            .await?
            .expect("profile should exist");
        assert_eq!(user.email, "new@example.com");
        let updated_at = user.updated_at.expect("updatedAt should be set");
        assert!(
            updated_at.timestamp_millis() > user.created_at.timestamp_millis(),
            "updatedAt should advance past createdAt on the second call"
        );

        client.shutdown().await;
        Ok(())
    }
}
