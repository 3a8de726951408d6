//! Admin repository for the database fallback login path

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use mongodb::{Collection, Database, bson::doc};

use common::database::collections;

use crate::models::Admin;

/// Admin repository
#[derive(Clone)]
pub struct AdminRepository {
    collection: Collection<Admin>,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(collections::ADMINS),
        }
    }

    /// Find an admin by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    /// Verify a password against the stored argon2 hash. An unparseable
    /// stored hash counts as a mismatch.
    pub fn verify_password(&self, admin: &Admin, password: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&admin.password) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
