pub mod client;
pub mod types;

pub use client::{ChatClient, ChatError, DEFAULT_BASE_URL, HttpChatClient};
pub use types::{ANONYMOUS_USER_ID, ChatRequest, ChatResponse};
