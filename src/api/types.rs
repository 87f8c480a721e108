use serde::{Deserialize, Serialize};

/// User id sent with every request. The widget has no notion of accounts.
pub const ANONYMOUS_USER_ID: &str = "anonymous";

/// Request body for `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
}

impl ChatRequest {
    /// Builds an anonymous request carrying `message` verbatim.
    pub fn anonymous(message: &str) -> Self {
        Self {
            message: message.to_string(),
            user_id: ANONYMOUS_USER_ID.to_string(),
        }
    }
}

/// Successful response body: the reply text lives under `response`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

/// Error body returned by the server on 4xx/5xx (`{"detail": "..."}`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
