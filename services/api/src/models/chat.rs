//! Chat transcript model

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author of a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(format!("Unknown chat role: {other}")),
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        })
    }
}

/// One persisted transcript turn. Turns are grouped by the client-generated
/// session id and are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime,
}

impl ChatMessage {
    /// Build a turn for insertion; the timestamp is stamped server-side.
    pub fn new(
        user_id: Option<String>,
        session_id: String,
        role: ChatRole,
        content: String,
    ) -> Self {
        Self {
            id: None,
            user_id,
            session_id,
            role,
            content,
            timestamp: DateTime::now(),
        }
    }
}

/// Transcript turn as returned to API callers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: ChronoDateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: message.user_id,
            session_id: message.session_id,
            role: message.role,
            content: message.content,
            timestamp: message.timestamp.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn chat_role_accepts_only_user_and_assistant() {
        assert_eq!("user".parse::<ChatRole>(), Ok(ChatRole::User));
        assert_eq!("Assistant".parse::<ChatRole>(), Ok(ChatRole::Assistant));
        assert!("system".parse::<ChatRole>().is_err());
        assert!("".parse::<ChatRole>().is_err());
    }

    #[test]
    fn chat_message_document_shape() {
        let message = ChatMessage::new(
            None,
            "session-1".to_string(),
            ChatRole::Assistant,
            "Hello".to_string(),
        );
        let doc = bson::to_document(&message).unwrap();
        assert_eq!(doc.get_str("sessionId").unwrap(), "session-1");
        assert_eq!(doc.get_str("role").unwrap(), "assistant");
        assert!(doc.get_datetime("timestamp").is_ok());
    }
}
