use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{ChatRequest, ChatResponse, ErrorBody};

/// Default location of the chat backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Errors that can occur while talking to the chat endpoint.
/// Every variant is treated as retryable by the send workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Endpoint answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Response body was not the expected `{ "response": string }` shape.
    Parse(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(msg) => write!(f, "network error: {msg}"),
            ChatError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ChatError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

/// The single outbound call the conversation depends on.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the name of the client (used in logs).
    fn name(&self) -> &str;

    /// Sends one message and returns the reply text.
    async fn chat(&self, message: &str) -> Result<String, ChatError>;
}

/// HTTP client for the `POST /chat` endpoint.
pub struct HttpChatClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

impl Default for HttpChatClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Pulls a readable message out of an error body, preferring `detail`.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => detail,
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn chat(&self, message: &str) -> Result<String, ChatError> {
        let request = ChatRequest::anonymous(message);
        let url = self.endpoint();

        info!("POST {} (message_len={})", url, message.chars().count());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Chat endpoint status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::new());
            let message = error_message(&body);
            warn!("Chat endpoint error: {} - {}", status.as_u16(), message);
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Parse(e.to_string()))?;

        debug!("Reply received ({} chars)", parsed.response.chars().count());
        Ok(parsed.response)
    }
}
