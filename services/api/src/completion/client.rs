//! HTTP client for the chat-completions API

use std::sync::Arc;

use anyhow::Result;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use thiserror::Error;
use tracing::error;

use super::prompt::SYSTEM_PROMPT;
use super::types::{CompletionMessage, CompletionRequest, CompletionResponse};

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
const MAX_COMPLETION_TOKENS: u32 = 500;
const SAMPLING_TEMPERATURE: f64 = 0.7;

/// Completion API configuration
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// API key for the completion service
    pub api_key: String,
    /// Model identifier
    pub model: String,
}

impl CompletionConfig {
    /// Create a new CompletionConfig from environment variables
    ///
    /// # Environment Variables
    /// - `OPENAI_API_KEY`: API key (required)
    /// - `COMPLETION_MODEL`: model identifier (default: `gpt-4-turbo-preview`)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let model =
            std::env::var("COMPLETION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(CompletionConfig { api_key, model })
    }
}

/// Errors from the completion proxy
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The conversation was empty; nothing to forward
    #[error("conversation must contain at least one message")]
    EmptyConversation,

    /// Transport-level failure talking to the completion service
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion service answered with a non-success status
    #[error("completion service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the external completion service. Stateless per call; cheap to
/// clone and share.
#[derive(Clone)]
pub struct CompletionClient {
    inner: Arc<CompletionClientInner>,
}

struct CompletionClientInner {
    client: reqwest::Client,
    model: String,
}

impl CompletionClient {
    /// Create a new completion client with default auth headers
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| anyhow::anyhow!("Invalid API key for header: {}", e))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(CompletionClientInner {
                client,
                model: config.model.clone(),
            }),
        })
    }

    /// Forward a conversation and relay the reply text.
    ///
    /// The fixed system prompt is prepended to the supplied turns; an empty
    /// conversation is rejected before any network activity. One request per
    /// call, no retry. A success body that is not the expected shape yields an
    /// empty string.
    pub async fn complete(
        &self,
        messages: Vec<CompletionMessage>,
    ) -> Result<String, CompletionError> {
        if messages.is_empty() {
            return Err(CompletionError::EmptyConversation);
        }

        let request = build_request(&self.inner.model, messages);

        let response = self
            .inner
            .client
            .post(COMPLETIONS_URL)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Completion service returned {}", status);
            return Err(CompletionError::Status(status));
        }

        let body = response.text().await?;
        Ok(extract_reply(&body))
    }
}

/// Assemble the request: system prompt first, then the caller's turns
fn build_request(model: &str, messages: Vec<CompletionMessage>) -> CompletionRequest {
    let mut all = Vec::with_capacity(messages.len() + 1);
    all.push(CompletionMessage {
        role: "system".to_string(),
        content: SYSTEM_PROMPT.to_string(),
    });
    all.extend(messages);

    CompletionRequest {
        model: model.to_string(),
        messages: all,
        temperature: SAMPLING_TEMPERATURE,
        max_tokens: MAX_COMPLETION_TOKENS,
    }
}

/// First choice's text, or empty string when the body is malformed
fn extract_reply(body: &str) -> String {
    serde_json::from_str::<CompletionResponse>(body)
        .ok()
        .and_then(|response| response.choices.into_iter().next())
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> CompletionMessage {
        CompletionMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn request_puts_the_system_prompt_first() {
        let request = build_request(
            "gpt-4-turbo-preview",
            vec![turn("user", "I need a website"), turn("assistant", "Sure")],
        );

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[0].content.contains("DevAgency"));
        assert_eq!(request.messages[1].content, "I need a website");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 500);
    }

    #[test]
    fn extract_reply_returns_the_first_choice_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello there"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(extract_reply(body), "Hello there");
    }

    #[test]
    fn extract_reply_is_empty_for_malformed_bodies() {
        assert_eq!(extract_reply("not json"), "");
        assert_eq!(extract_reply("{}"), "");
        assert_eq!(extract_reply(r#"{"choices":[]}"#), "");
        assert_eq!(extract_reply(r#"{"choices":[{"message":{}}]}"#), "");
    }

    #[tokio::test]
    async fn empty_conversations_are_rejected_before_any_request() {
        let client = CompletionClient::new(&CompletionConfig {
            api_key: "test-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
        .unwrap();

        let result = client.complete(Vec::new()).await;
        assert!(matches!(result, Err(CompletionError::EmptyConversation)));
    }
}
