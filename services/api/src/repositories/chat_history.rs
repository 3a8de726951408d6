//! Chat history repository for database operations

use anyhow::Result;
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};
use tracing::info;

use common::database::collections;

use crate::models::ChatMessage;

/// Chat history repository
#[derive(Clone)]
pub struct ChatHistoryRepository {
    collection: Collection<ChatMessage>,
}

impl ChatHistoryRepository {
    /// Create a new chat history repository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(collections::CHAT_HISTORY),
        }
    }

    /// Append one transcript turn. No dedup; the transcript is append-only.
    pub async fn append(&self, message: ChatMessage) -> Result<()> {
        info!("Appending chat turn for session {}", message.session_id);

        self.collection.insert_one(&message).await?;
        Ok(())
    }

    /// All turns for a session in ascending timestamp order. Unbounded.
    pub async fn list_by_session(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let cursor = self
            .collection
            .find(doc! { "sessionId": session_id })
            .sort(doc! { "timestamp": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;
    use mongodb::bson::DateTime;
    use serial_test::serial;

    fn turn(session: &str, content: &str, millis: i64) -> ChatMessage {
        let mut message = ChatMessage::new(
            None,
            session.to_string(),
            ChatRole::User,
            content.to_string(),
        );
        message.timestamp = DateTime::from_millis(millis);
        message
    }

    #[tokio::test]
    #[serial]
    async fn turns_come_back_in_ascending_order() -> Result<()> {
        let Ok(uri) = std::env::var("MONGODB_URI") else {
            eprintln!("MONGODB_URI not set, skipping chat history repository test");
            return Ok(());
        };
        let client = mongodb::Client::with_uri_str(&uri).await?;
        let db = client.database("devagency_test");
        db.collection::<ChatMessage>(collections::CHAT_HISTORY)
            .drop()
            .await
            .ok();
        let repository = ChatHistoryRepository::new(&db);

        repository.append(turn("s-1", "second", 2_000)).await?;
        repository.append(turn("s-1", "first", 1_000)).await?;
        repository.append(turn("s-1", "third", 3_000)).await?;
        repository.append(turn("s-2", "other session", 1_500)).await?;

        let turns = repository.list_by_session("s-1").await?;
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);

        client.shutdown().await;
        Ok(())
    }
}
