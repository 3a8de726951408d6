//! Lead repository for database operations

use anyhow::{Context, Result};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database, bson::doc, bson::oid::ObjectId};
use tracing::info;

use common::database::collections;

use crate::models::{Lead, LeadStatus};

/// Lead repository
#[derive(Clone)]
pub struct LeadRepository {
    collection: Collection<Lead>,
}

impl LeadRepository {
    /// Create a new lead repository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(collections::LEADS),
        }
    }

    /// Insert a new lead and return its generated id
    pub async fn insert(&self, lead: Lead) -> Result<ObjectId> {
        info!("Storing lead for {}", lead.email);

        let result = self.collection.insert_one(&lead).await?;
        result
            .inserted_id
            .as_object_id()
            .context("inserted lead id was not an ObjectId")
    }

    /// List leads, optionally filtered by status, newest first.
    ///
    /// Unbounded; lead volume for a single agency site stays small.
    pub async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        let filter = match status {
            Some(status) => doc! { "status": status.to_string() },
            None => doc! {},
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Count leads, optionally filtered by status
    pub async fn count(&self, status: Option<LeadStatus>) -> Result<u64> {
        let filter = match status {
            Some(status) => doc! { "status": status.to_string() },
            None => doc! {},
        };

        Ok(self.collection.count_documents(filter).await?)
    }
}
