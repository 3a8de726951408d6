//! Chat routes: transcript persistence and the completion proxy

use axum::{
    Json,
    extract::{ConnectInfo, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;

use crate::{
    completion::{CompletionError, CompletionMessage},
    error::ApiError,
    models::{ChatMessage, ChatMessageResponse, ChatRole},
    state::AppState,
    validation::{is_non_empty, sanitize, sanitize_optional},
};

use super::enforce_rate_limit;

/// Request to append one transcript turn
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendMessageRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessageResponse>,
}

/// One turn of the running conversation sent to the proxy. Roles are relayed
/// to the completion service as-is; the widget sends `user`/`assistant`.
#[derive(Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Request to the completion proxy
#[derive(Deserialize)]
pub struct ChatProxyRequest {
    #[serde(default)]
    pub messages: Option<Vec<ChatTurn>>,
}

/// Append a transcript turn
pub async fn append_message(
    State(state): State<AppState>,
    Json(payload): Json<AppendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = payload.session_id.as_deref().unwrap_or("");
    let role_raw = payload.role.as_deref().unwrap_or("");
    let content = payload.content.as_deref().unwrap_or("");

    if !is_non_empty(session_id) || !is_non_empty(role_raw) || !is_non_empty(content) {
        return Err(ApiError::Validation(
            "Invalid input: sessionId, role and content are required".to_string(),
        ));
    }
    let role: ChatRole = role_raw.parse().map_err(ApiError::Validation)?;

    let message = ChatMessage::new(
        sanitize_optional(payload.user_id.as_deref()),
        sanitize(session_id),
        role,
        sanitize(content),
    );

    state.chat_repository.append(message).await.map_err(|e| {
        tracing::error!("Failed to save message: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(json!({ "success": true })))
}

/// List all turns for a session, oldest first
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = query
        .session_id
        .as_deref()
        .filter(|id| is_non_empty(id))
        .ok_or_else(|| ApiError::Validation("Missing sessionId".to_string()))?;

    let messages = state
        .chat_repository
        .list_by_session(&sanitize(session_id))
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch messages: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(MessagesResponse {
        messages: messages.into_iter().map(ChatMessageResponse::from).collect(),
    }))
}

/// Forward the running conversation to the completion service.
///
/// Stateless: the caller resends the full transcript every turn. Rate limited
/// per IP since every call costs upstream tokens.
pub async fn chat(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ChatProxyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    enforce_rate_limit(&state, "chat", &addr).await?;

    let turns: Vec<CompletionMessage> = payload
        .messages
        .unwrap_or_default()
        .into_iter()
        .map(|turn| CompletionMessage {
            role: turn.role,
            content: turn.content,
        })
        .collect();

    let message = state
        .completion_client
        .complete(turns)
        .await
        .map_err(|e| match e {
            CompletionError::EmptyConversation => {
                ApiError::Validation("Invalid input: messages are required".to_string())
            }
            other => {
                tracing::error!("Chat completion failed: {}", other);
                ApiError::Upstream
            }
        })?;

    Ok(Json(json!({ "message": message })))
}
