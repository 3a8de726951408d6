//! Project repository for database operations

use anyhow::{Context, Result};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database, bson::doc, bson::oid::ObjectId};
use tracing::info;

use common::database::collections;

use crate::models::Project;

/// Project repository
#[derive(Clone)]
pub struct ProjectRepository {
    collection: Collection<Project>,
}

impl ProjectRepository {
    /// Create a new project repository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(collections::PROJECTS),
        }
    }

    /// Insert a new project and return its generated id
    pub async fn insert(&self, project: Project) -> Result<ObjectId> {
        info!("Storing project: {}", project.title);

        let result = self.collection.insert_one(&project).await?;
        result
            .inserted_id
            .as_object_id()
            .context("inserted project id was not an ObjectId")
    }

    /// List projects owned by a user, newest first. Unbounded.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Project>> {
        let cursor = self
            .collection
            .find(doc! { "userId": user_id })
            .sort(doc! { "createdAt": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Count all projects
    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn list_by_user_filters_on_owner() -> Result<()> {
        let Ok(uri) = std::env::var("MONGODB_URI") else {
            eprintln!("MONGODB_URI not set, skipping project repository test");
            return Ok(());
        };
        let client = mongodb::Client::with_uri_str(&uri).await?;
        let db = client.database("devagency_test");
        db.collection::<Project>(collections::PROJECTS)
            .drop()
            .await
            .ok();
        let repository = ProjectRepository::new(&db);

        repository
            .insert(Project::new(
                Some("owner-a".to_string()),
                "A".to_string(),
                "first".to_string(),
                None,
                None,
            ))
            .await?;
        repository
            .insert(Project::new(
                Some("owner-b".to_string()),
                "B".to_string(),
                "second".to_string(),
                None,
                None,
            ))
            .await?;

        let projects = repository.list_by_user("owner-a").await?;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "A");
        assert_eq!(projects[0].status, ProjectStatus::Pending);

        assert_eq!(repository.count().await?, 2);

        client.shutdown().await;
        Ok(())
    }
}
